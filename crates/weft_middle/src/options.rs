use clap::{Arg, ArgAction, ArgMatches};
use serde::{Deserialize, Serialize};

/// Process-wide compiler switches, passed explicitly to every pass through the
/// compiler context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CompilerOptions {
    /// Record user errors and keep going instead of stopping at the first one.
    /// Code generation is disabled once any error was recorded.
    pub ignore_errors: bool,
    pub ignore_warnings: bool,
    pub no_codegen: bool,
    /// Log the name of each pass as it runs.
    pub print_passes: bool,
    /// Verify the tree after every pass and show internal node ids in bug reports.
    pub developer: bool,
}

impl CompilerOptions {
    /// Flag names shared by the command line, `weft.toml` and the `WEFT_*`
    /// environment variables.
    pub const FLAGS: [&'static str; 5] = [
        "ignore-errors",
        "ignore-warnings",
        "no-codegen",
        "print-passes",
        "developer",
    ];

    /// Command-line arguments understood by [`CompilerOptions::from_args`].
    pub fn args() -> Vec<Arg> {
        vec![
            Arg::new("ignore-errors")
                .long("ignore-errors")
                .action(ArgAction::SetTrue)
                .help("Attempt to ignore errors"),
            Arg::new("ignore-warnings")
                .long("ignore-warnings")
                .action(ArgAction::SetTrue)
                .help("Don't print warnings"),
            Arg::new("no-codegen")
                .long("no-codegen")
                .action(ArgAction::SetTrue)
                .help("Suppress code generation"),
            Arg::new("print-passes")
                .long("print-passes")
                .action(ArgAction::SetTrue)
                .help("Print compiler passes"),
            Arg::new("developer")
                .long("devel")
                .action(ArgAction::SetTrue)
                .help("Compile as a developer"),
        ]
    }

    /// Overlays command-line flags on `self`; flags can only switch options on.
    pub fn from_args(mut self, args: &ArgMatches) -> Self {
        for flag in Self::FLAGS {
            if args.get_flag(flag) {
                self.set(flag, true);
            }
        }
        self
    }

    /// Sets an option by its flag name. Returns `false` for unknown names.
    pub fn set(&mut self, flag: &str, value: bool) -> bool {
        let slot = match flag {
            "ignore-errors" => &mut self.ignore_errors,
            "ignore-warnings" => &mut self.ignore_warnings,
            "no-codegen" => &mut self.no_codegen,
            "print-passes" => &mut self.print_passes,
            "developer" => &mut self.developer,
            _ => return false,
        };
        *slot = value;
        true
    }
}
