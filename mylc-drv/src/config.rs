//! Command-line surface: one `.mylang` source in, a directory of
//! `.h`/`.cpp` pairs out.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

#[derive(Debug, Parser)]
#[command(name = "mylc")]
#[command(author, version, about = "Compiles MyLang modules to C++", long_about = None)]
pub struct Config {
    /// MyLang source file to compile
    pub input: PathBuf,

    /// Directory to write generated .h/.cpp pairs into
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Increase log verbosity; repeat for more detail (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
