use std::env;
use std::path::PathBuf;

#[derive(Debug)]
pub struct Args {
    pub verbose: bool,
    pub skip_adb_check: bool,
    pub template_dir: Option<PathBuf>,
}

impl Args {
    pub fn parse() -> Option<Self> {
        let args: Vec<String> = env::args().collect();

        let mut verbose: bool = false;
        let mut skip_adb_check: bool = false;
        let mut template_dir: Option<PathBuf> = None;

        for arg in args.iter().skip(1) {
            if arg == "--help" || arg == "-h" {
                print_help();
                return None;
            } else if arg == "--version" {
                println!("gbl-bot v{}", env!("CARGO_PKG_VERSION"));
                return None;
            } else if arg == "--verbose" || arg == "-v" {
                verbose = true;
            } else if arg == "--skip-adb-check" {
                skip_adb_check = true;
            } else if arg.starts_with("--templates=") {
                if let Some(val) = arg.strip_prefix("--templates=") {
                    if val.is_empty() {
                        eprintln!("❌ --templates needs a directory path");
                        return None;
                    }
                    template_dir = Some(PathBuf::from(val));
                }
            } else {
                eprintln!("❌ Unknown argument: {}", arg);
                print_help();
                return None;
            }
        }

        Some(Args {
            verbose,
            skip_adb_check,
            template_dir,
        })
    }
}

fn print_help() {
    println!("🤖 GO Battle League Bot");
    println!();
    println!("USAGE:");
    println!("    gbl-bot [FLAGS]");
    println!();
    println!("FLAGS:");
    println!("    (no flags)          Run the bot against the first connected device");
    println!("    --templates=DIR     Load match templates from DIR (default: templates)");
    println!("    --skip-adb-check    Skip the ADB installation and device probe at startup");
    println!("    --verbose, -v       Enable debug output");
    println!("    --help, -h          Show this help message");
    println!("    --version           Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    gbl-bot");
    println!("    gbl-bot --templates=assets/cues");
    println!("    gbl-bot --verbose --skip-adb-check");
}
