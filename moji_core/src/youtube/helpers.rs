use std::sync::LazyLock;

use anyhow::Result;
use quick_xml::{
    Reader,
    escape::{resolve_html5_entity, unescape_with},
    events::{BytesStart, Event},
};
use regex::Regex;

use super::dto::{CaptionLine, CaptionTrack};

static YOUTUBE_URL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"https?://(?:www\.)?youtube\.com/watch\?v=([a-zA-Z0-9_-]{11})",
        r"https?://youtu\.be/([a-zA-Z0-9_-]{11})",
        r"https?://(?:www\.)?youtube\.com/embed/([a-zA-Z0-9_-]{11})",
        r"https?://(?:www\.)?youtube\.com/v/([a-zA-Z0-9_-]{11})",
        r"https?://(?:www\.)?youtube\.com/shorts/([a-zA-Z0-9_-]{11})",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("static YouTube URL pattern"))
    .collect()
});

static INNER_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("static pattern"));

const CAPTION_TRACKS_KEY: &str = "\"captionTracks\":";

/// Finds the first YouTube link in `text` and returns its 11 character video id.
pub fn extract_video_id(text: &str) -> Option<String> {
    for pattern in YOUTUBE_URL_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(text) {
            let video_id = captures.get(1)?.as_str().to_string();
            log::debug!("YouTube link matched {}: {}", pattern.as_str(), video_id);
            return Some(video_id);
        }
    }

    log::debug!("No YouTube link found in: {:?}", text);
    None
}

/// Pulls the caption track list out of a watch page. A page without captions yields an empty list.
pub fn parse_caption_tracks(page: &str) -> Result<Vec<CaptionTrack>> {
    let Some(position) = page.find(CAPTION_TRACKS_KEY) else {
        return Ok(Vec::new());
    };

    let rest = &page[position + CAPTION_TRACKS_KEY.len()..];
    let tracks = serde_json::Deserializer::from_str(rest)
        .into_iter::<Vec<CaptionTrack>>()
        .next()
        .ok_or_else(|| anyhow::anyhow!("captionTracks has no value"))??;

    Ok(tracks)
}

/// Manual captions win over auto-generated (`a.`) ones.
pub fn select_track<'a>(tracks: &'a [CaptionTrack], lang: &str) -> Option<&'a CaptionTrack> {
    let manual = format!(".{}", lang);
    let generated = format!("a.{}", lang);

    tracks
        .iter()
        .find(|track| track.vss_id.as_deref() == Some(manual.as_str()))
        .or_else(|| {
            tracks
                .iter()
                .find(|track| track.vss_id.as_deref() == Some(generated.as_str()))
        })
        .or_else(|| {
            tracks.iter().find(|track| {
                track
                    .vss_id
                    .as_deref()
                    .is_some_and(|vss_id| vss_id.contains(&manual))
            })
        })
}

/// Parses a timed-text document into its `<text>` lines.
pub fn parse_timed_text(xml: &str) -> Result<Vec<CaptionLine>> {
    let mut reader = Reader::from_str(xml);
    let mut lines = Vec::new();
    let mut current: Option<CaptionLine> = None;

    loop {
        match reader.read_event()? {
            Event::Start(element) if element.name().as_ref() == b"text" => {
                current = Some(CaptionLine {
                    start: float_attribute(&element, "start"),
                    dur: float_attribute(&element, "dur"),
                    text: String::new(),
                });
            }
            Event::Text(text) => {
                if let Some(line) = current.as_mut() {
                    line.text.push_str(&text.unescape_with(resolve_html5_entity)?);
                }
            }
            Event::End(element) if element.name().as_ref() == b"text" => {
                if let Some(mut line) = current.take() {
                    line.text = clean_caption_text(&line.text);
                    lines.push(line);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(lines)
}

pub fn join_caption_text(lines: &[CaptionLine]) -> String {
    lines
        .iter()
        .map(|line| line.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Seconds from the start of the video to the end of the last line.
pub fn caption_span(lines: &[CaptionLine]) -> f64 {
    lines
        .iter()
        .map(|line| line.start + line.dur)
        .fold(0.0, f64::max)
}

fn float_attribute(element: &BytesStart, name: &str) -> f64 {
    element
        .try_get_attribute(name)
        .ok()
        .flatten()
        .and_then(|attribute| {
            std::str::from_utf8(&attribute.value)
                .ok()?
                .parse::<f64>()
                .ok()
        })
        .unwrap_or(0.0)
}

fn clean_caption_text(text: &str) -> String {
    // Bodies arrive escaped twice; a second pass that fails keeps the first.
    let decoded = unescape_with(text, resolve_html5_entity)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| text.to_string());
    let stripped = INNER_TAG.replace_all(&decoded, "");

    stripped.replace(['\n', '\r'], " ").trim().to_string()
}
