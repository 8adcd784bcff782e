use chrono::{DateTime, Utc};

use crate::stats::{ProfileStats, StatsState};

const START_Y: i32 = 30;
const LINE_HEIGHT: i32 = 20;
const LEFT_PADDING: f32 = 15.0;
const RIGHT_PADDING: f32 = 30.0;
const CHAR_WIDTH: f32 = 9.6;
const MIN_COL_CHARS: usize = 40;

const TITLE: &str = "Open Source Impact";
const SUBTITLE: &str = "Data pulled live from GitHub API";

#[derive(Clone, Copy)]
pub enum Theme {
    Dark,
    Light,
}

pub struct ThemeColors {
    pub bg: &'static str,
    pub text: &'static str,
    pub key: &'static str,
    pub value: &'static str,
    pub cc: &'static str,
}

impl Theme {
    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Dark => ThemeColors {
                bg: "#0d0d0d",
                text: "#f5f5f5",
                key: "#9ca3af",
                value: "#e53935",
                cc: "#4b5563",
            },
            Theme::Light => ThemeColors {
                bg: "#ffffff",
                text: "#111111",
                key: "#4b5563",
                value: "#c62828",
                cc: "#9ca3af",
            },
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Theme::Dark => "dark_mode.svg",
            Theme::Light => "light_mode.svg",
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Splits a row into key, dot leader and value so the values line up at `align_width`.
pub fn build_stat_row(key: &str, value: &str, align_width: usize) -> (String, String, String) {
    let key_part = format!("{key}: ");
    let base_len = key_part.len() + value.len();
    let available = align_width.saturating_sub(base_len);

    let dots = match available {
        0 => "".to_string(),
        1 => " ".to_string(),
        2 => ". ".to_string(),
        n => ".".repeat(n),
    };

    (key_part, dots, value.to_string())
}

fn build_header_line(label: &str, align_width: usize) -> String {
    let base = format!("{label} ");
    let dash_count = align_width.saturating_sub(base.len()) + 2;
    format!("{base}{}", "-".repeat(dash_count))
}

/// Card rows as (label, displayed value). Counts read as "N+".
fn stat_rows(stats: &ProfileStats) -> [(&'static str, String); 3] {
    [
        ("Public Repos", format!("{}+", stats.repository_count)),
        ("Followers", format!("{}+", stats.follower_count)),
        ("Contributions", format!("{}+", stats.contribution_count)),
    ]
}

/// Renders the statistics view, or nothing while a load is in progress.
pub fn render_stats_card(state: &StatsState, theme: Theme) -> Option<String> {
    if state.is_loading() {
        return None;
    }
    Some(generate_svg(&state.stats, state.fetched_at, theme))
}

pub fn generate_svg(stats: &ProfileStats, fetched_at: Option<DateTime<Utc>>, theme: Theme) -> String {
    let colors = theme.colors();
    let rows = stat_rows(stats);

    let align_width = rows
        .iter()
        .map(|(k, v)| k.len() + 2 + v.len())
        .max()
        .unwrap_or(0)
        .max(SUBTITLE.len())
        .max(MIN_COL_CHARS);

    let mut body = String::new();
    let mut line = 0i32;
    let mut y = || {
        let y = START_Y + line * LINE_HEIGHT;
        line += 1;
        y
    };

    body.push_str(&format!(
        "<tspan x=\"{LEFT_PADDING}\" y=\"{}\">{}</tspan>\n",
        y(),
        escape_xml(&build_header_line(TITLE, align_width))
    ));
    body.push_str(&format!(
        "<tspan x=\"{LEFT_PADDING}\" y=\"{}\" class=\"cc\">{}</tspan>\n",
        y(),
        escape_xml(SUBTITLE)
    ));
    y();

    for (label, value) in &rows {
        let (k, d, v) = build_stat_row(label, value, align_width);
        body.push_str(&format!(
            r#"<tspan x="{LEFT_PADDING}" y="{}" class="cc">. </tspan>
<tspan class="key">{}</tspan><tspan class="cc">{}</tspan><tspan class="value">{}</tspan>
"#,
            y(),
            escape_xml(&k),
            escape_xml(&d),
            escape_xml(&v)
        ));
    }

    if let Some(at) = fetched_at {
        y();
        body.push_str(&format!(
            "<tspan x=\"{LEFT_PADDING}\" y=\"{}\" class=\"cc\">Updated {}</tspan>\n",
            y(),
            at.format("%Y-%m-%d %H:%M UTC")
        ));
    }

    let w = LEFT_PADDING + (align_width as f32 + 2.0) * CHAR_WIDTH + RIGHT_PADDING;
    let h = (START_Y + line * LINE_HEIGHT) as f32;

    format!(
        r#"<?xml version='1.0' encoding='UTF-8'?>
<svg xmlns="http://www.w3.org/2000/svg"
     width="{w}px" height="{h}px"
     font-family="ConsolasFallback,Consolas,monospace"
     font-size="16px">

<style>
.key      {{ fill: {key}; }}
.value    {{ fill: {value}; }}
.cc       {{ fill: {cc}; }}
</style>

<rect width="{w}px" height="{h}px" fill="{bg}" rx="15"/>

<text fill="{text}" xml:space="preserve">
{body}
</text>

</svg>
"#,
        w = w,
        h = h,
        bg = colors.bg,
        text = colors.text,
        key = colors.key,
        value = colors.value,
        cc = colors.cc,
        body = body
    )
}
