use clap::Args;
use timeline_core::{format_time, parse_time, Config, Day, DayView, Editor, EventBlock, ROW_HEIGHT};

#[derive(Args)]
pub struct RenderArgs {
    /// Day to show, 0 (Mon) through 6 (Sun)
    #[arg(long, default_value_t = 0)]
    day: u8,
    /// Window start (HH:MM), overrides config
    #[arg(long)]
    start: Option<String>,
    /// Window end (HH:MM), overrides config
    #[arg(long)]
    end: Option<String>,
    /// Event as "DAY,HH:MM,HH:MM,TITLE" (repeatable)
    #[arg(long = "event")]
    events: Vec<String>,
    /// Skip the sample event
    #[arg(long)]
    no_seed: bool,
    /// Output the day view as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: RenderArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load_or_default();
    if args.no_seed {
        config.events.seed_sample_event = false;
    }
    let mut editor = Editor::from_config(&config)?;

    apply_window_override(&mut editor, args.start.as_deref(), args.end.as_deref())?;
    for raw in &args.events {
        let (day, title, start, end) = parse_event_arg(raw)?;
        editor.add_event_at(day, title, start, end);
    }
    editor.select_day(Day::new(args.day)?);

    let changes = editor.drain_changes();
    let view = editor.day_view();
    tracing::debug!(
        day = args.day,
        blocks = view.blocks.len(),
        changes = changes.len(),
        "rendering day"
    );
    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render_text(&view));
    }
    Ok(())
}

/// Apply `--start`/`--end`. When the new start lies at or past the current
/// end, the end moves first so the start is not clamped against the old one.
fn apply_window_override(
    editor: &mut Editor,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    match (start, end) {
        (Some(start), Some(end)) if parse_time(start)? >= editor.window().end() => {
            editor.set_window_end_text(end)?;
            editor.set_window_start_text(start)?;
        }
        (start, end) => {
            if let Some(start) = start {
                editor.set_window_start_text(start)?;
            }
            if let Some(end) = end {
                editor.set_window_end_text(end)?;
            }
        }
    }
    Ok(())
}

fn parse_event_arg(raw: &str) -> Result<(Day, String, i32, i32), Box<dyn std::error::Error>> {
    let mut parts = raw.splitn(4, ',');
    let (Some(day), Some(start), Some(end)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("invalid event '{raw}' (expected DAY,HH:MM,HH:MM,TITLE)").into());
    };
    let title = parts.next().unwrap_or("").trim().to_string();
    let day = Day::new(day.trim().parse()?)?;
    Ok((day, title, parse_time(start)?, parse_time(end)?))
}

/// One line per row: the axis label, then every block that starts in that
/// row. Rows a block spans into are marked with `|`. A block that begins
/// above the window is listed on the first row.
fn render_text(view: &DayView) -> String {
    let step = view.window.step();
    let mut out = format!(
        "{} {} - {} ({} min rows)\n",
        view.day_label,
        format_time(view.window.start()),
        format_time(view.window.end()),
        step
    );

    for (row, tick) in view.ticks.iter().enumerate() {
        let top = row as f32 * ROW_HEIGHT;
        let starting: Vec<&EventBlock> = view
            .blocks
            .iter()
            .filter(|b| b.is_visible(view.canvas_height))
            .filter(|b| {
                let shown = b.layout.offset.max(0.0);
                shown >= top && shown < top + ROW_HEIGHT
            })
            .collect();
        let spanning = view
            .blocks
            .iter()
            .any(|b| b.layout.offset < top && b.layout.offset + b.layout.height > top);

        let marker = if tick.major { '=' } else { '-' };
        let gutter = if spanning { '|' } else { ' ' };
        out.push_str(&format!("{} {marker}{gutter}", tick.label));
        for block in &starting {
            out.push_str(&format!(" [{}] {}", block.time_label, block.title));
        }
        out.push('\n');
    }

    let hidden: Vec<&EventBlock> = view
        .blocks
        .iter()
        .filter(|b| !b.is_visible(view.canvas_height))
        .collect();
    if !hidden.is_empty() {
        out.push_str("outside window:\n");
        for block in hidden {
            out.push_str(&format!("  [{}] {}\n", block.time_label, block.title));
        }
    }
    out
}
