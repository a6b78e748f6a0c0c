use std::{
    ffi::{OsStr, OsString},
    fs::File,
    path::{Path, PathBuf},
    process::{Command, ExitStatus, Stdio},
};

use log::{debug, info};

use crate::RunError;

/// find the executable `name`. A name with a directory component is taken as
/// a path and only checked for existence, anything else is searched for on
/// `PATH`
pub fn locate(name: &str) -> Result<PathBuf, RunError> {
    let p = Path::new(name);
    if p.components().count() > 1 {
        return if p.is_file() {
            Ok(p.to_path_buf())
        } else {
            Err(RunError::NotFound(name.to_owned()))
        };
    }
    let Some(path) = std::env::var_os("PATH") else {
        return Err(RunError::NotFound(name.to_owned()));
    };
    for dir in std::env::split_paths(&path) {
        let candidate = dir.join(name);
        if candidate.is_file() {
            return Ok(candidate);
        }
        if cfg!(windows) {
            let exe = candidate.with_extension("exe");
            if exe.is_file() {
                return Ok(exe);
            }
        }
    }
    Err(RunError::NotFound(name.to_owned()))
}

/// A single invocation of an external program. Relative `stdout_to` and
/// `stdin_from` paths are taken relative to `dir` when it is set
#[derive(Clone, Debug)]
pub struct Job {
    program: PathBuf,
    args: Vec<OsString>,
    dir: Option<PathBuf>,
    stdout: Option<PathBuf>,
    stdin: Option<PathBuf>,
}

impl Job {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            dir: None,
            stdout: None,
            stdin: None,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_owned());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_owned()));
        self
    }

    /// run in `dir` instead of the current directory
    pub fn dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// write standard output to the file at `path`, truncating it
    pub fn stdout_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.stdout = Some(path.into());
        self
    }

    pub fn stdin_from(mut self, path: impl Into<PathBuf>) -> Self {
        self.stdin = Some(path.into());
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// the command line as it would be typed into a shell, for logging
    pub fn command_line(&self) -> String {
        let mut s = self.program.display().to_string();
        for arg in &self.args {
            s.push(' ');
            s.push_str(&arg.to_string_lossy());
        }
        if let Some(stdin) = &self.stdin {
            s.push_str(&format!(" < {}", stdin.display()));
        }
        if let Some(stdout) = &self.stdout {
            s.push_str(&format!(" > {}", stdout.display()));
        }
        s
    }

    fn resolve(&self, p: &Path) -> PathBuf {
        match &self.dir {
            Some(dir) if p.is_relative() => dir.join(p),
            _ => p.to_path_buf(),
        }
    }

    fn command(&self) -> Result<Command, RunError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(dir) = &self.dir {
            cmd.current_dir(dir);
        }
        if let Some(stdin) = &self.stdin {
            let p = self.resolve(stdin);
            let f = File::open(&p).map_err(|e| RunError::io(&p, e))?;
            cmd.stdin(Stdio::from(f));
        }
        Ok(cmd)
    }

    fn spawn_error(&self, e: std::io::Error) -> RunError {
        let name = self.program.display().to_string();
        match e.kind() {
            std::io::ErrorKind::NotFound => RunError::NotFound(name),
            k => RunError::Spawn(name, k),
        }
    }

    fn check(&self, status: ExitStatus) -> Result<(), RunError> {
        if status.success() {
            return Ok(());
        }
        Err(RunError::Failed {
            program: self.program.display().to_string(),
            status: status.code(),
        })
    }

    /// run the program to completion, failing if it cannot be started or
    /// exits unsuccessfully
    pub fn run(&self) -> Result<(), RunError> {
        let mut cmd = self.command()?;
        if let Some(stdout) = &self.stdout {
            let p = self.resolve(stdout);
            let f = File::create(&p).map_err(|e| RunError::io(&p, e))?;
            cmd.stdout(Stdio::from(f));
        }
        info!("running {}", self.command_line());
        let status = cmd.status().map_err(|e| self.spawn_error(e))?;
        debug!("{} finished with {status}", self.program.display());
        self.check(status)
    }

    /// like [Job::run], but capture and return standard output instead of
    /// redirecting it
    pub fn output(&self) -> Result<String, RunError> {
        let mut cmd = self.command()?;
        cmd.stderr(Stdio::inherit());
        info!("running {}", self.command_line());
        let out = cmd.output().map_err(|e| self.spawn_error(e))?;
        self.check(out.status)?;
        Ok(String::from_utf8_lossy(&out.stdout).into_owned())
    }
}
