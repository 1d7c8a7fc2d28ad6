use chrono::prelude::*;
use std::fs::OpenOptions;
use std::io::Write;

pub struct Logger;

impl Logger {
    pub fn log(content: &str, path: &str, add_time: bool) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .append(true)
            .create(true)
            .open(path)?;
        let mut result: String = String::from(content);
        if add_time {
            result = stamp(&result);
        }
        writeln!(file, "{}", result)?;
        Ok(())
    }
}

fn stamp(content: &str) -> String {
    let time_stamp = Local::now().format("%Y-%m%d_%H:%M:%S").to_string();
    format!("{}: {}", &time_stamp, content)
}

/// Console log with an optional file copy.
#[derive(Debug, Clone, Default)]
pub struct RunLog {
    path: Option<String>,
    quiet: bool,
}

impl RunLog {
    pub fn new(path: Option<String>) -> Self {
        Self { path, quiet: false }
    }

    /// Log that neither prints nor writes; used where output is noise.
    pub fn silent() -> Self {
        Self { path: None, quiet: true }
    }

    pub fn log(&self, content: &str, add_time: bool) {
        if self.quiet {
            return;
        }
        let line = match add_time {
            true => stamp(content),
            false => content.to_owned(),
        };
        println!("{}", &line);
        if let Some(path) = &self.path {
            if let Err(e) = Logger::log(&line, path, false) {
                eprintln!("log to {} failed: {}", path, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use super::*;

    #[test]
    fn appends_lines_to_file() {
        let path = std::env::temp_dir().join(format!(
            "rolling-bfi-logger-{}.log",
            std::process::id()
        ));
        let path_str = path.to_str().unwrap().to_owned();
        let _ = fs::remove_file(&path);

        Logger::log("first", &path_str, false).unwrap();
        let log = RunLog::new(Some(path_str.clone()));
        log.log("second", true);

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "first");
        assert!(lines[1].ends_with(": second"), "{}", lines[1]);
        assert_eq!(log.path.as_deref(), Some(path_str.as_str()));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn stamp_has_date_prefix() {
        let line = stamp("x");
        // %Y-%m%d_%H:%M:%S is 18 characters
        assert_eq!(line.len(), 18 + 3);
        assert!(line.ends_with(": x"));
    }
}
