use clap::Subcommand;
use timeline_core::{format_time, parse_time, timeline::MINUTES_PER_DAY};

#[derive(Subcommand)]
pub enum TimeAction {
    /// Parse HH:MM into minutes since midnight
    Parse {
        /// Time text, e.g. "09:30"
        text: String,
    },
    /// Format minutes since midnight as HH:MM
    Format {
        /// Minutes, 0 through 1440
        minutes: i32,
    },
}

pub fn run(action: TimeAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimeAction::Parse { text } => {
            println!("{}", parse_time(&text)?);
        }
        TimeAction::Format { minutes } => {
            if !(0..=MINUTES_PER_DAY).contains(&minutes) {
                return Err(format!("minutes out of range: {minutes} (0-{MINUTES_PER_DAY})").into());
            }
            println!("{}", format_time(minutes));
        }
    }
    Ok(())
}
