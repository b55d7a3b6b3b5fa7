//! List the built-in frame sets.

use anyhow::Result;
use serde::Serialize;
use tabled::{
    Table, Tabled,
    settings::{Padding, Style, object::Columns},
};
use termspin::FrameStyle;

/// Frames shown in the preview column before eliding the rest
const PREVIEW_FRAMES: usize = 4;

#[derive(Tabled)]
struct FrameRow {
    #[tabled(rename = "STYLE")]
    name: String,
    #[tabled(rename = "FRAMES")]
    count: usize,
    #[tabled(rename = "PREVIEW")]
    preview: String,
}

#[derive(Serialize)]
struct FrameEntry {
    name: &'static str,
    frames: Vec<String>,
}

fn preview(frame_style: FrameStyle) -> String {
    let frames = frame_style.frames();
    let mut shown = frames
        .iter()
        .take(PREVIEW_FRAMES)
        .collect::<Vec<_>>()
        .join(" ");
    if frames.len() > PREVIEW_FRAMES {
        shown.push_str(" …");
    }
    shown
}

pub fn run(json: bool) -> Result<()> {
    if json {
        let entries: Vec<FrameEntry> = FrameStyle::ALL
            .iter()
            .map(|s| FrameEntry {
                name: s.name(),
                frames: s.frames().to_vec(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    let rows: Vec<FrameRow> = FrameStyle::ALL
        .iter()
        .map(|s| FrameRow {
            name: s.name().to_string(),
            count: s.frames().len(),
            preview: preview(*s),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::blank())
        .modify(Columns::new(0..3), Padding::new(0, 1, 0, 0));

    println!("{table}");

    Ok(())
}
