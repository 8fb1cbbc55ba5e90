use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{Shell, generate};

use super::App;

#[derive(Args, Clone, Debug)]
pub struct CompletionsArg {
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

impl CompletionsArg {
    pub fn run(self) -> Result<()> {
        let mut command = App::command();
        generate(self.shell, &mut command, "imap-data-access", &mut std::io::stdout());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    use crate::cli::Commands;

    #[test]
    fn test_shell_is_parsed() {
        let app = App::try_parse_from(["imap-data-access", "completions", "bash"]).unwrap();
        assert!(matches!(app.cmd, Commands::Completions(CompletionsArg { shell: Shell::Bash })));
    }

    #[test]
    fn test_script_mentions_subcommands() {
        let mut buf = Vec::new();
        generate(Shell::Bash, &mut App::command(), "imap-data-access", &mut buf);
        let script = String::from_utf8(buf).unwrap();
        assert!(script.contains("download"));
        assert!(script.contains("query"));
        assert!(script.contains("upload"));
    }
}
