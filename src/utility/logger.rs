
use colored::*;


pub enum Level {
    Info,
    Warn,
    Error,
}

pub struct Logger {}

impl Logger {

    fn format(level: &Level, label: &str, content: Option<&str>) -> String {
        let prefix = match level {
            Level::Info  => "INFO".green(),
            Level::Warn  => "WARN".truecolor(255, 130, 0),
            Level::Error => "ERROR".truecolor(255, 20, 0),
        };
        let content = match content {
            Some(content) => format!("{}: {}", label.truecolor(140, 140, 140), content),
            None          => label.to_string()
        };
        format!("[{}] {}", prefix, content)
    }

    fn log(level: Level, label: &str, content: Option<&str>) {
        let line = Logger::format(&level, label, content);
        match level {
            Level::Error => eprintln!("{}", line),
            _            => println!("{}", line),
        }
    }

    #[allow(unused)]
    pub fn info(label: &str) {
        Logger::log(Level::Info, label, None);
    }

    #[allow(unused)]
    pub fn warn(label: &str) {
        Logger::log(Level::Warn, label, None);
    }

    #[allow(unused)]
    pub fn err(label: &str) {
        Logger::log(Level::Error, label, None);
    }

    #[allow(unused)]
    pub fn info_long(label: &str, content: &str) {
        Logger::log(Level::Info, label, Some(content));
    }

    #[allow(unused)]
    pub fn warn_long(label: &str, content: &str) {
        Logger::log(Level::Warn, label, Some(content));
    }

    #[allow(unused)]
    pub fn err_long(label: &str, content: &str) {
        Logger::log(Level::Error, label, Some(content));
    }

}
