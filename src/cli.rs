use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "jpeg-squeeze",
    about = "Re-encode an image as JPEG with adjustable quality and scale",
    long_about = "jpeg-squeeze takes one image in any format the image crate can decode, \
                  scales it by a percentage and re-encodes it as JPEG at the chosen quality. \
                  The output is written under a generated compressed_<timestamp>_<n>.jpg name.",
    version,
    after_help = "EXAMPLES:\n  \
    jpeg-squeeze compress photo.png -q 85 -s 50 -o ./out\n  \
    jpeg-squeeze estimate photo.png -q 60"
)]
pub struct Args {
    #[arg(
        short = 'Q',
        long,
        global = true,
        help = "Only print errors"
    )]
    pub quiet: bool,

    #[arg(
        short = 'v',
        long,
        global = true,
        help = "Print each compression step"
    )]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(
        about = "Compress an image to JPEG",
        long_about = "Decode the input, scale both sides by --scale percent (rounded down, \
                      at least 1 pixel) and encode the result as JPEG at --quality."
    )]
    Compress {
        #[arg(help = "Input image file path")]
        input: PathBuf,

        #[arg(
            short = 'o',
            long,
            default_value = ".",
            help = "Directory to write the compressed image into"
        )]
        output: PathBuf,

        #[arg(
            short = 'q',
            long,
            help = "JPEG quality (0-100, default: 80)",
            long_help = "JPEG quality from 0 (smallest) to 100 (best). \
                         The encoder works in steps of 1-100, so 0 behaves like 1."
        )]
        quality: Option<u8>,

        #[arg(
            short = 's',
            long,
            help = "Scale in percent (1-1000, default: 100)",
            long_help = "Percentage applied to both width and height before encoding. \
                         50 halves each side; 100 keeps the original size."
        )]
        scale: Option<u32>,
    },

    #[command(
        about = "Show original and estimated output size",
        long_about = "Print the input size and a rough output estimate (input size times quality). \
                      The estimate is linear and does not reflect real JPEG behavior."
    )]
    Estimate {
        #[arg(help = "Input image file path")]
        input: PathBuf,

        #[arg(
            short = 'q',
            long,
            help = "JPEG quality (0-100, default: 80)"
        )]
        quality: Option<u8>,
    },
}
