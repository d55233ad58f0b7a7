use clap::{Parser, Subcommand};
use selfpath::WideEncoding;

#[derive(Debug,Parser)]
#[clap(version = "0.1", about = "Find where the running program and its libraries live")]
pub struct Options {
    #[clap(help="Answer every path resolution with no result", long="disabled")]
    pub disabled : bool,
    #[clap(help="Wide character encoding (UTF-16LE, UTF-16BE, UTF-32LE, UTF-32BE)", long="wide-encoding")]
    pub wide_encoding : Option<WideEncoding>,
    #[clap(subcommand)]
    pub command : Command
}

#[derive(Debug,Subcommand)]
pub enum Command {
    #[clap(about="Print the file behind a loaded image (the executable if no name is given)")]
    Locate {
        #[clap(help="File name of a loaded library; only the last path segment is compared")]
        name : Option<String>
    },
    #[clap(about="List every image loaded into this process")]
    Images,
    #[clap(about="Summarize the file behind a loaded image")]
    Describe {
        #[clap(help="File name of a loaded library")]
        name : Option<String>
    },
    #[clap(about="Expand a leading $ORIGIN against a reference path")]
    Expand {
        #[clap(help="The template, e.g. '$ORIGIN/../share'")]
        template : String,
        #[clap(help="Reference path (defaults to this executable)", long="reference")]
        reference : Option<String>
    },
    #[clap(about="Search a path list for a program")]
    Which {
        #[clap(help="The file name to look for")]
        name : String,
        #[clap(help="Path list to search (defaults to PATH)", long="path")]
        path : Option<String>,
        #[clap(help="Accept files that are not executable", long="any")]
        any : bool
    },
    #[clap(about="Print an environment variable (empty if unset)")]
    Env {
        #[clap(help="Variable name")]
        name : String
    },
    #[clap(about="Copy at most MAX characters of TEXT")]
    Dup {
        #[clap(help="Text to copy")]
        text : String,
        #[clap(help="Character bound; 0 copies everything", long="max", default_value="0")]
        max : usize
    },
    #[clap(about="Run the built-in diagnostics")]
    Selftest
}
