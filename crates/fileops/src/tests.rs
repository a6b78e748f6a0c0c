use std::{collections::HashSet, fs::read_to_string, path::Path};

use insta::assert_snapshot;
use tempfile::TempDir;
use test_case::test_case;

use crate::{
    omega, pdf,
    rename::{self, Rename},
    table::{self, split_record},
    uvvis::{self, Options},
    wsl, *,
};

fn table(header: &[&str], rows: &[&[&str]]) -> Table {
    Table::new(
        header.iter().map(|&s| s.to_owned()).collect(),
        rows.iter()
            .map(|r| r.iter().map(|&s| s.to_owned()).collect())
            .collect(),
    )
}

#[test_case("a,b,c", &["a", "b", "c"])]
#[test_case("a,,c,", &["a", "", "c", ""]; "empty fields")]
#[test_case(r#""x, y",2"#, &["x, y", "2"]; "quoted comma")]
#[test_case(r#""say ""hi""",3"#, &[r#"say "hi""#, "3"]; "escaped quote")]
#[test_case("1,2\r", &["1", "2"]; "crlf")]
fn records(line: &str, want: &[&str]) {
    assert_eq!(split_record(line), want);
}

#[test]
fn table_round_trip() {
    let t = Table::parse("name,value\n\"a,b\",1\n\nc,2\n");
    assert_eq!(t, table(&["name", "value"], &[&["a,b", "1"], &["c", "2"]]));
    assert_eq!(t.to_csv(), "name,value\n\"a,b\",1\nc,2\n");
    assert_eq!(t.cell(1, 5), "");
}

#[test]
fn multiline_fields() {
    let t = table(&["a", "b"], &[&["x\ny", "1"], &["two\n\nlines", "2"]]);
    let csv = t.to_csv();
    assert_eq!(csv, "a,b\n\"x\ny\",1\n\"two\n\nlines\",2\n");
    assert_eq!(Table::parse(&csv), t);

    assert_eq!(
        table::records("h\r\n\"open\r\nquote\",1\r\n"),
        [vec!["h"], vec!["open\nquote", "1"]]
    );
    // an unterminated quote runs to the end of the input
    assert_eq!(table::records("\"a\nb"), [vec!["a\nb"]]);
}

#[test]
fn concat_union() {
    let a = table(&["x", "y"], &[&["1", "2"], &["3", "4"]]);
    let b = table(&["y", "z"], &[&["5", "6"]]);
    let got = concat(&[a, b]);
    assert_eq!(got.header, ["x", "y", "z"]);
    assert_eq!(
        got.rows,
        [["1", "2", ""], ["3", "4", ""], ["", "5", "6"]]
    );
}

#[test_case(&[0]; "single empty")]
#[test_case(&[3, 4]; "two tables")]
#[test_case(&[1, 0, 7, 2]; "four tables")]
fn concat_rows(sizes: &[usize]) {
    let tables: Vec<Table> = sizes
        .iter()
        .map(|&n| {
            let rows: Vec<Vec<String>> =
                (0..n).map(|i| vec![i.to_string(), "v".to_owned()]).collect();
            Table::new(vec!["i".to_owned(), "v".to_owned()], rows)
        })
        .collect();
    let got = concat(&tables);
    assert_eq!(got.len(), sizes.iter().sum::<usize>());
    assert_eq!(got.header.len(), 2);
}

#[test]
fn concat_files_skips() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.csv");
    let b = dir.path().join("b.csv");
    std::fs::write(&a, "k,v\n1,one\n2,two\n").unwrap();
    std::fs::write(&b, "k,v\n3,three\n").unwrap();
    std::fs::write(dir.path().join("c.txt"), "k,v\n4,four\n").unwrap();
    let inputs = [
        a,
        dir.path().join("c.txt"),
        dir.path().join("missing.csv"),
        b,
    ];
    let got = table::concat_files(&inputs).unwrap();
    assert_eq!(got.len(), 3);

    let out = dir.path().join("nested/out").join(table::DEFAULT_OUTPUT);
    got.write(&out).unwrap();
    assert_snapshot!(read_to_string(&out).unwrap(), @r"
    k,v
    1,one
    2,two
    3,three
    ");
}

#[test]
fn uvvis_filter() {
    let text = read_to_string("testfiles/cary60.csv").unwrap();
    let got = uvvis::filter(&text, &Options::default()).unwrap();
    assert_snapshot!(got.data.to_csv(), @r"
    Wavelength [nm],Sample A,Sample B
    797.0,0.0130,0.0230
    798.0,0.0120,0.0220
    799.0,0.0110,0.0210
    800.0,0.0100,0.0200
    ");
    assert_eq!(
        got.log,
        [
            "Sample A",
            "Collection Time: 1/8/2024 10:02:11 AM",
            "Scan Rate (nm/min),600.0",
            "Sample B",
            "Collection Time: 1/8/2024 10:06:40 AM",
        ]
    );
}

#[test]
fn uvvis_options() {
    let text = read_to_string("testfiles/cary60.csv").unwrap();
    let opts = Options {
        max_rows: Some(2),
        ..Options::default()
    };
    let got = uvvis::filter(&text, &opts).unwrap();
    assert_eq!(got.data.len(), 2);
    assert_eq!(got.data.cell(0, 0), "797.0");
    assert_eq!(got.data.cell(1, 0), "798.0");

    // the label row and the first two scans
    let opts = Options {
        split_at: Some(3),
        ..Options::default()
    };
    let got = uvvis::filter(&text, &opts).unwrap();
    assert_eq!(got.data.len(), 2);
    assert_eq!(got.data.cell(0, 0), "799.0");
    assert_eq!(got.log[0], "798.0,0.0120,798.0,100.0,798.0,0.0220");

    assert!(uvvis::filter("", &Options::default()).is_err());
    assert!(uvvis::filter("only,header\n", &Options::default()).is_err());
}

#[test_case("OD_10mm_sampleA", "sampleA")]
#[test_case("lex_340nm_illu_PS", "PS")]
#[test_case("plain", "plain")]
fn uvvis_names(stem: &str, want: &str) {
    assert_eq!(uvvis::clean_name(stem, &uvvis::NAME_TOKENS), want);
}

#[test]
fn uvvis_files() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("OD_10mm_sampleA.csv");
    std::fs::copy("testfiles/cary60.csv", &input).unwrap();
    let out_dir = dir.path().join(uvvis::OUTPUT_DIR);
    let (data, log) =
        uvvis::filter_file(&input, &out_dir, &Options::default()).unwrap();
    assert_eq!(data, out_dir.join("sampleA_f_data.csv"));
    assert_eq!(log, out_dir.join("sampleA_f_log.csv"));
    assert!(read_to_string(&log).unwrap().starts_with("Sample A\n"));

    std::fs::write(dir.path().join("other.dat"), "").unwrap();
    std::fs::write(dir.path().join("x_f_data.csv"), "").unwrap();
    std::fs::write(dir.path().join("notes.txt"), "").unwrap();
    let got = uvvis::inputs(dir.path()).unwrap();
    assert_eq!(got, [input, dir.path().join("other.dat")]);
}

#[test]
fn illumination() {
    let got = uvvis::illumination_names(&["PS_0", "PS_+10", "PS_+20"]);
    assert_eq!(got.unwrap(), ["0", "10", "30"]);
    assert!(uvvis::illumination_names(&["PS_dark"]).is_err());

    let dir = TempDir::new().unwrap();
    let out = uvvis::illumination_file(
        "testfiles/illu.csv",
        dir.path(),
        &Options::default(),
    )
    .unwrap();
    assert_eq!(out, dir.path().join("illu_select.csv"));
    assert_snapshot!(read_to_string(&out).unwrap(), @r"
    Wavelength [nm],0,10,30
    499.0,0.51,0.41,0.31
    500.0,0.50,0.40,0.30
    ");
}

const ID: &str = "0123456789abcdef0123456789abcdef";

#[test_case("Meeting 0123456789abcdef0123456789abcdef.md", false, "Meeting.md")]
#[test_case("Two words 0123456789abcdef0123456789abcdef.md", false, "Two words.md"; "spaces kept")]
#[test_case("0123456789abcdef0123456789abcdef.md", false, "0123456789abcdef0123456789abcdef.md"; "id only")]
#[test_case("Short abc.md", false, "Short abc.md")]
#[test_case("Project 0123456789abcdef0123456789abcdef", true, "Project")]
fn strip_ids(name: &str, is_dir: bool, want: &str) {
    assert_eq!(rename::strip_id(name, is_dir), want);
}

#[test]
fn rename_tree() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    let project = root.join(format!("Project {ID}"));
    std::fs::create_dir(&project).unwrap();
    std::fs::write(project.join(format!("Task {ID}.md")), "task").unwrap();
    std::fs::write(root.join(format!("Notes {ID}.md")), "new").unwrap();
    std::fs::write(root.join("Notes.md"), "old").unwrap();
    std::fs::write(root.join("plain.txt"), "").unwrap();

    let want = vec![
        Rename {
            from: project.join(format!("Task {ID}.md")),
            to: project.join("Task.md"),
        },
        Rename {
            from: root.join(format!("Notes {ID}.md")),
            to: root.join("Notes_1.md"),
        },
        Rename {
            from: project.clone(),
            to: root.join("Project"),
        },
    ];

    let got = rename::rename_tree(root, true).unwrap();
    assert_eq!(got, want);
    assert!(project.exists());

    let got = rename::rename_tree(root, false).unwrap();
    assert_eq!(got, want);
    assert_eq!(read_to_string(root.join("Project/Task.md")).unwrap(), "task");
    assert_eq!(read_to_string(root.join("Notes_1.md")).unwrap(), "new");
    assert_eq!(read_to_string(root.join("Notes.md")).unwrap(), "old");
    assert!(rename::rename_tree(root, false).unwrap().is_empty());
}

#[cfg(unix)]
#[test]
fn rename_tree_symlinks() {
    use std::os::unix::fs::symlink;

    let dir = TempDir::new().unwrap();
    let outside = TempDir::new().unwrap();
    let root = dir.path();
    std::fs::write(root.join(format!("Note {ID}.md")), "").unwrap();
    std::fs::write(outside.path().join(format!("Other {ID}.md")), "").unwrap();
    symlink(".", root.join("loop")).unwrap();
    symlink(outside.path(), root.join(format!("Link {ID}"))).unwrap();

    let got = rename::rename_tree(root, false).unwrap();
    let want = vec![
        Rename {
            from: root.join(format!("Link {ID}")),
            to: root.join("Link"),
        },
        Rename {
            from: root.join(format!("Note {ID}.md")),
            to: root.join("Note.md"),
        },
    ];
    assert_eq!(got, want);
    assert!(root.join("Link").is_symlink());
    assert!(outside.path().join(format!("Other {ID}.md")).exists());
}

#[test]
fn uniquify() {
    let dir = TempDir::new().unwrap();
    let p = dir.path().join("a.txt");
    assert_eq!(rename::uniquify(&p, &HashSet::new()), p);
    std::fs::write(&p, "").unwrap();
    let taken = HashSet::from([dir.path().join("a_1.txt")]);
    assert_eq!(rename::uniquify(&p, &taken), dir.path().join("a_2.txt"));
}

#[test]
fn pdf_pages() {
    assert_eq!(pdf::pages("one\x0ctwo\x0c"), ["one", "two"]);
    assert_eq!(pdf::pages(""), [""]);
}

#[test]
fn pdf_search() {
    let pages = [
        "The quick brown Fox jumps over the lazy dog",
        "Foxes are quick",
    ];
    let got = pdf::search(&pages, "FOX");
    assert_eq!(
        got,
        [
            pdf::Hit {
                page: 1,
                context: "the quick brown fox jumps over the lazy".to_owned(),
            },
            pdf::Hit {
                page: 2,
                context: "foxes are quick".to_owned(),
            },
        ]
    );
    assert_eq!(pdf::count(&pages, "the"), 2);
    assert_eq!(
        pdf::search(&pages, "the")[1].context,
        "brown fox jumps over the lazy dog"
    );
    assert_eq!(pdf::count(&pages, "quick"), 2);
    assert_eq!(pdf::count(&pages, "cat"), 0);
}

#[cfg(unix)]
#[test]
fn pdf_report() {
    // echo prints its arguments, which stand in for the page text
    let tools = qcrun::Tools::default().with("pdftotext", "echo");
    let dir = TempDir::new().unwrap();
    let doc = dir.path().join("paper.pdf");
    std::fs::write(&doc, "").unwrap();
    let got = pdf::report(&tools, &doc, "paper.pdf").unwrap();
    assert_eq!(got.count, 1);
    assert_eq!(got.hits[0].page, 1);
    assert_eq!(pdf::pdfs_in(dir.path()).unwrap(), [doc]);

    let missing = dir.path().join("missing.pdf");
    assert_eq!(
        pdf::report(&tools, &missing, "x"),
        Err(FileError::FileNotFound(missing.display().to_string()))
    );
}

#[test_case(1, 5, 2, &[1, 3, 5])]
#[test_case(10, 10, 1, &[10])]
#[test_case(100, 130, 20, &[100, 120])]
#[test_case(5, 1, 1, &[]; "empty range")]
fn omega_values(low: i64, high: i64, step: i64, want: &[i64]) {
    assert_eq!(omega::values(low, high, step).unwrap(), want);
}

#[test]
fn omega_inputs() {
    assert!(omega::values(1, 5, 0).is_err());
    assert_eq!(
        omega::values(i64::MAX - 1, i64::MAX, 5).unwrap(),
        [i64::MAX - 1]
    );

    let dir = TempDir::new().unwrap();
    let template = dir.path().join(omega::TEMPLATE);
    std::fs::write(
        &template,
        "! wB97X-D3 def2-TZVP\n%method\n  RangeSepMu 0.Value\nend\n",
    )
    .unwrap();
    let got = omega::write_inputs(dir.path(), &template, 100, 200, 50).unwrap();
    assert_eq!(got.len(), 3);
    assert_eq!(got[1], dir.path().join("omegaIP_150.inp"));
    assert_snapshot!(read_to_string(&got[1]).unwrap(), @r"
    ! wB97X-D3 def2-TZVP
    %method
      RangeSepMu 0.150
    end
    ");

    let missing = omega::write_inputs(dir.path(), Path::new("nope"), 1, 2, 1);
    assert_eq!(missing, Err(FileError::FileNotFound("nope".to_owned())));
}

#[test_case(r"C:\Users\me\Documents", "/mnt/c/Users/me/Documents")]
#[test_case(r"D:\", "/mnt/d")]
#[test_case("C:", "/mnt/c")]
#[test_case("e:/data/run1", "/mnt/e/data/run1")]
#[test_case(r"relative\dir", "relative/dir")]
fn wsl_paths(path: &str, want: &str) {
    assert_eq!(wsl::to_wsl(path), want);
}
