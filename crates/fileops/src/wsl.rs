/// convert a Windows path like `C:\Users\me` to the path of the same
/// directory inside WSL, `/mnt/c/Users/me`. Paths without a drive letter only
/// have their separators replaced
pub fn to_wsl(path: &str) -> String {
    let path = path.trim().replace('\\', "/");
    let mut chars = path.chars();
    match (chars.next(), chars.next()) {
        (Some(drive), Some(':')) if drive.is_ascii_alphabetic() => {
            let rest = path[2..].trim_end_matches('/');
            let rest = rest.strip_prefix('/').unwrap_or(rest);
            let mut s = format!("/mnt/{}", drive.to_ascii_lowercase());
            if !rest.is_empty() {
                s.push('/');
                s.push_str(rest);
            }
            s
        }
        _ => path,
    }
}
