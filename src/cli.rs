// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "rod-viewer")]
#[command(about = "Orbiting 3D viewer for rod and reflector box models", long_about = None)]
pub struct Cli {
    /// Model JSON file; the built-in demo model is shown when omitted
    #[arg(short, long)]
    pub model: Option<PathBuf>,

    /// Viewer configuration JSON file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Initial window width in logical pixels
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Disable the hover label overlay
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// Log debug output from the viewer
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Filter string handed to env_logger when `RUST_LOG` is unset
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "info,rod_viewer=debug"
        } else {
            "info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["rod-viewer"]);
        assert_eq!(cli.model, None);
        assert_eq!((cli.width, cli.height), (1280, 800));
        assert!(!cli.no_ui);
        assert_eq!(cli.log_filter(), "info");
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "rod-viewer",
            "--model",
            "bridge.json",
            "--no-ui",
            "-v",
            "--width",
            "640",
        ]);
        assert_eq!(cli.model, Some(PathBuf::from("bridge.json")));
        assert!(cli.no_ui);
        assert_eq!(cli.width, 640);
        assert_eq!(cli.log_filter(), "info,rod_viewer=debug");
    }
}
