use crate::models::{
    CalendarMonth, MAX_INTENSITY, MIN_INTENSITY, MOOD_PALETTE, MoodEntry, MoodStats, TrendSeries,
};
use chrono::{Duration, FixedOffset, NaiveDate};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Add,
    List,
    Calendar,
    Trends,
}

impl View {
    const ALL: [View; 4] = [View::Add, View::List, View::Calendar, View::Trends];

    pub fn from_query(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("list") => View::List,
            Some("calendar") => View::Calendar,
            Some("trends") => View::Trends,
            _ => View::Add,
        }
    }

    fn slug(self) -> &'static str {
        match self {
            View::Add => "add",
            View::List => "list",
            View::Calendar => "calendar",
            View::Trends => "trends",
        }
    }

    fn title(self) -> &'static str {
        match self {
            View::Add => "Add Mood",
            View::List => "Mood History",
            View::Calendar => "Calendar View",
            View::Trends => "Mood Trends",
        }
    }
}

pub fn render_page(view: View, content: &str, stats: Option<&MoodStats>, saved: bool) -> String {
    let nav = View::ALL
        .iter()
        .map(|item| {
            let class = if *item == view { "nav-link active" } else { "nav-link" };
            format!(
                r#"<a class="{class}" href="/?view={}">{}</a>"#,
                item.slug(),
                item.title()
            )
        })
        .collect::<String>();
    let toast = if saved {
        r#"<div class="toast" id="toast">Mood added. Your mood has been successfully recorded.</div>"#
    } else {
        ""
    };

    PAGE_HTML
        .replace("{{NAV}}", &nav)
        .replace("{{TOAST}}", toast)
        .replace("{{CONTENT}}", content)
        .replace("{{STATS}}", &stats.map(render_stats).unwrap_or_default())
}

pub fn render_add(today: NaiveDate) -> String {
    let mut palette = String::new();
    for (index, mood) in MOOD_PALETTE.iter().enumerate() {
        let checked = if index == 0 { " checked" } else { "" };
        let _ = write!(
            palette,
            r#"<label class="mood-tile" style="background-color: {color}">
  <input type="radio" name="mood" value="{value}"{checked} />
  <span class="emoji">{emoji}</span><span class="mood-name">{label}</span>
</label>"#,
            color = mood.color,
            value = escape_html(&mood.mood()),
            emoji = mood.emoji,
            label = mood.label,
        );
    }

    let mut levels = String::new();
    for level in MIN_INTENSITY..=MAX_INTENSITY {
        let checked = if level == 5 { " checked" } else { "" };
        let _ = write!(
            levels,
            r#"<label class="level"><input type="radio" name="intensity" value="{level}"{checked} /><span>{level}</span></label>"#
        );
    }

    format!(
        r#"<section class="card">
  <h2>How are you feeling?</h2>
  <form method="post" action="/entries" class="add-form">
    <div class="palette">{palette}</div>
    <label class="field">Custom mood
      <input type="text" name="custom_mood" placeholder="Enter custom mood (overrides the selection)" />
    </label>
    <fieldset class="field">
      <legend>Mood intensity</legend>
      <div class="levels">{levels}</div>
    </fieldset>
    <label class="field">Note
      <textarea name="note" rows="4" placeholder="Add a note about your mood (optional)"></textarea>
    </label>
    <label class="field">Date
      <input type="date" name="date" value="{today}" />
    </label>
    <button type="submit">Confirm</button>
  </form>
</section>"#,
        today = today.format("%Y-%m-%d"),
    )
}

pub fn render_list(entries: &[MoodEntry], editing: Option<&str>, offset: FixedOffset) -> String {
    if entries.is_empty() {
        return r#"<section class="card"><h2>Mood History</h2><p class="muted">No moods recorded yet.</p></section>"#
            .to_string();
    }

    let mut items = String::new();
    for entry in entries {
        let id = escape_html(&entry.id);
        let date = entry.date.with_timezone(&offset).format("%B %-d, %Y");
        if editing == Some(entry.id.as_str()) {
            let _ = write!(
                items,
                r#"<li class="entry editing">
  <form method="post" action="/entries/{id}">
    <span class="entry-date">{date}</span>
    <input type="text" name="mood" value="{mood}" required />
    <label class="field">Intensity
      <input type="range" name="intensity" min="{MIN_INTENSITY}" max="{MAX_INTENSITY}" step="1" value="{intensity}" />
    </label>
    <textarea name="note" rows="3">{note}</textarea>
    <div class="row">
      <button type="submit">Save</button>
      <a class="button ghost" href="/?view=list">Cancel</a>
    </div>
  </form>
</li>"#,
                mood = escape_html(&entry.mood),
                intensity = entry.intensity,
                note = escape_html(&entry.note),
            );
        } else {
            let note = if entry.note.is_empty() {
                String::new()
            } else {
                format!(r#"<p class="note">{}</p>"#, escape_html(&entry.note))
            };
            let _ = write!(
                items,
                r#"<li class="entry">
  <div class="row"><span class="entry-date">{date}</span><a class="button ghost" href="/?view=list&amp;edit={id}">Edit</a></div>
  <div>Mood: {mood}</div>
  <div>Intensity: {intensity}/{MAX_INTENSITY}</div>
  {note}
</li>"#,
                mood = escape_html(&entry.mood),
                intensity = entry.intensity,
            );
        }
    }

    format!(r#"<section class="card"><h2>Mood History</h2><ul class="entries">{items}</ul></section>"#)
}

pub fn render_calendar(calendar: &CalendarMonth) -> String {
    let mut cells = String::new();
    for name in ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"] {
        let _ = write!(cells, r#"<div class="weekday">{name}</div>"#);
    }
    for _ in 0..calendar.leading_blanks {
        cells.push_str(r#"<div class="day blank"></div>"#);
    }
    for day in &calendar.days {
        let today = if day.is_today { " today" } else { "" };
        match &day.entry {
            Some(cell) => {
                let _ = write!(
                    cells,
                    r#"<div class="day{today}" style="background-color: hsl({hue}, 70%, 50%)" title="{mood}">
  <span class="day-number">{number}</span>
  <span class="emoji">{emoji}</span><span class="day-label">{label}</span>
</div>"#,
                    hue = cell.hue,
                    mood = escape_html(&cell.mood),
                    number = day.day,
                    emoji = cell.emoji.as_deref().map(escape_html).unwrap_or_default(),
                    label = escape_html(&cell.label),
                );
            }
            None => {
                let _ = write!(
                    cells,
                    r#"<div class="day empty{today}"><span class="day-number">{}</span></div>"#,
                    day.day
                );
            }
        }
    }

    let nav = match (calendar.days.first(), calendar.days.last()) {
        (Some(first), Some(last)) => format!(
            r#"<div class="row"><a class="button ghost" href="/?view=calendar&amp;month={prev}">&larr; {prev}</a><a class="button ghost" href="/?view=calendar&amp;month={next}">{next} &rarr;</a></div>"#,
            prev = (first.date - Duration::days(1)).format("%Y-%m"),
            next = (last.date + Duration::days(1)).format("%Y-%m"),
        ),
        _ => String::new(),
    };

    format!(
        r#"<section class="card"><h2>Mood Calendar <span class="muted">{month}</span></h2>{nav}<div class="calendar">{cells}</div></section>"#,
        month = calendar.month,
    )
}

const CHART_WIDTH: f64 = 600.0;
const CHART_HEIGHT: f64 = 260.0;
const CHART_PAD_X: f64 = 44.0;
const CHART_PAD_Y: f64 = 34.0;
const CHART_TOP: f64 = 24.0;

pub fn render_trend(trend: &TrendSeries) -> String {
    let count = trend.points.len().max(2) as f64;
    let x_step = (CHART_WIDTH - CHART_PAD_X * 2.0) / (count - 1.0);
    let scale_y = (CHART_HEIGHT - CHART_TOP - CHART_PAD_Y) / f64::from(MAX_INTENSITY);
    let x = |index: usize| CHART_PAD_X + index as f64 * x_step;
    let y = |value: f64| CHART_HEIGHT - CHART_PAD_Y - value * scale_y;

    let mut grid = String::new();
    for tick in (0..=MAX_INTENSITY).step_by(2) {
        let y_pos = y(f64::from(tick));
        let _ = write!(
            grid,
            r#"<line class="chart-grid" x1="{CHART_PAD_X}" y1="{y_pos:.2}" x2="{x2}" y2="{y_pos:.2}" /><text class="chart-label" x="{lx}" y="{ty:.2}" text-anchor="end">{tick}</text>"#,
            x2 = CHART_WIDTH - CHART_PAD_X,
            lx = CHART_PAD_X - 10.0,
            ty = y_pos + 4.0,
        );
    }

    let mut circles = String::new();
    let mut labels = String::new();
    for (index, point) in trend.points.iter().enumerate() {
        if let Some(intensity) = point.intensity {
            let _ = write!(
                circles,
                r#"<circle class="chart-point" cx="{:.2}" cy="{:.2}" r="4"><title>{}: {}</title></circle>"#,
                x(index),
                y(f64::from(intensity)),
                point.label,
                intensity
            );
        }
        if index % 5 == 0 || index + 1 == trend.points.len() {
            let _ = write!(
                labels,
                r#"<text class="chart-label" x="{:.2}" y="{}" text-anchor="middle">{}</text>"#,
                x(index),
                CHART_HEIGHT - CHART_PAD_Y + 18.0,
                point.label
            );
        }
    }

    let path = trend_path(trend, x, y);
    let summary = match trend.average_intensity {
        Some(average) => format!(
            "{} of the last {} days recorded, averaging {average:.2}/{MAX_INTENSITY}.",
            trend.recorded_days,
            trend.points.len()
        ),
        None => format!("No entries in the last {} days yet.", trend.points.len()),
    };

    format!(
        r#"<section class="card">
  <h2>Mood Trends</h2>
  <svg class="chart" viewBox="0 0 {CHART_WIDTH} {CHART_HEIGHT}" role="img" aria-label="Mood intensity over the last 30 days">
    {grid}<path class="chart-line" d="{path}" />{circles}{labels}
  </svg>
  <p class="muted">{summary} This chart shows your mood intensity from {start} to {end}; days without an entry are left as gaps.</p>
</section>"#,
        start = trend.start.format("%b %d"),
        end = trend.end.format("%b %d"),
    )
}

/// SVG path through recorded points, lifting the pen over missing days.
fn trend_path(trend: &TrendSeries, x: impl Fn(usize) -> f64, y: impl Fn(f64) -> f64) -> String {
    let mut path = String::new();
    let mut pen_down = false;
    for (index, point) in trend.points.iter().enumerate() {
        match point.intensity {
            Some(intensity) => {
                let command = if pen_down { 'L' } else { 'M' };
                if !path.is_empty() {
                    path.push(' ');
                }
                let _ = write!(path, "{command} {:.2} {:.2}", x(index), y(f64::from(intensity)));
                pen_down = true;
            }
            None => pen_down = false,
        }
    }
    path
}

pub fn render_stats(stats: &MoodStats) -> String {
    let Some(average) = stats.average_intensity else {
        return r#"<section class="card"><h2>Mood Statistics</h2><p>Total entries: 0</p><p class="muted">No data yet. Add a mood to see statistics.</p></section>"#
            .to_string();
    };

    let mut shares = String::new();
    for share in &stats.moods {
        let _ = write!(
            shares,
            r#"<li><div class="row"><span>{mood}</span><span>{count} ({percentage:.1}%)</span></div><div class="bar"><span style="width: {percentage:.1}%"></span></div></li>"#,
            mood = escape_html(&share.mood),
            count = share.count,
            percentage = share.percentage,
        );
    }

    format!(
        r#"<section class="card">
  <h2>Mood Statistics</h2>
  <p>Total entries: {total}</p>
  <p>Average intensity: {average:.2}/{MAX_INTENSITY}</p>
  <ul class="shares">{shares}</ul>
</section>"#,
        total = stats.total_count,
    )
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Mood Tracker</title>
  <style>
    :root {
      --bg: #f3f4f6;
      --panel: #ffffff;
      --ink: #1f2937;
      --muted: #6b7280;
      --accent: #3b82f6;
      --soft: #e5e7eb;
      --card: #f9fafb;
      --line: rgba(31, 41, 55, 0.1);
      --shadow: 0 10px 30px rgba(31, 41, 55, 0.12);
      color-scheme: light dark;
    }

    @media (prefers-color-scheme: dark) {
      :root {
        --bg: #111827;
        --panel: #1f2937;
        --ink: #f3f4f6;
        --muted: #9ca3af;
        --accent: #60a5fa;
        --soft: #374151;
        --card: #273244;
        --line: rgba(243, 244, 246, 0.12);
        --shadow: 0 10px 30px rgba(0, 0, 0, 0.4);
      }
    }

    * { box-sizing: border-box; }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: system-ui, -apple-system, "Segoe UI", sans-serif;
    }

    .shell { display: flex; min-height: 100vh; }

    .sidebar {
      width: 240px;
      background: var(--panel);
      box-shadow: var(--shadow);
      padding: 16px;
      display: flex;
      flex-direction: column;
      gap: 6px;
    }

    .nav-link {
      padding: 10px 12px;
      border-radius: 8px;
      color: var(--ink);
      text-decoration: none;
    }

    .nav-link.active { background: var(--soft); font-weight: 600; }

    main { flex: 1; padding: 16px; display: grid; gap: 16px; align-content: start; }

    header h1 { margin: 0; font-size: 1.6rem; }

    .card {
      background: var(--panel);
      border-radius: 12px;
      box-shadow: var(--shadow);
      padding: 20px;
    }

    .card h2 { margin-top: 0; }

    .muted { color: var(--muted); }

    .row { display: flex; justify-content: space-between; align-items: center; gap: 8px; }

    .add-form { display: grid; gap: 16px; }

    .palette {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(110px, 1fr));
      gap: 10px;
    }

    .mood-tile {
      aspect-ratio: 1;
      border-radius: 10px;
      display: flex;
      flex-direction: column;
      align-items: center;
      justify-content: center;
      color: white;
      font-weight: 600;
      cursor: pointer;
      position: relative;
    }

    .mood-tile input { position: absolute; opacity: 0; }
    .mood-tile:has(input:checked) { outline: 3px solid var(--ink); }
    .mood-tile .emoji { font-size: 2.2rem; }

    .field { display: grid; gap: 6px; border: none; padding: 0; margin: 0; }
    .field input, .field textarea, .entry input, .entry textarea {
      font: inherit;
      padding: 8px;
      border: 1px solid var(--line);
      border-radius: 8px;
    }

    .levels { display: flex; flex-wrap: wrap; gap: 6px; }
    .level input { display: none; }
    .level span {
      display: inline-grid;
      place-items: center;
      width: 40px;
      height: 40px;
      border: 1px solid var(--line);
      border-radius: 8px;
      cursor: pointer;
    }
    .level input:checked + span { background: var(--accent); color: white; }

    button, .button {
      font: inherit;
      border: none;
      border-radius: 8px;
      padding: 10px 16px;
      background: var(--accent);
      color: white;
      cursor: pointer;
      text-decoration: none;
    }

    .button.ghost { background: transparent; color: var(--accent); }

    .entries { list-style: none; padding: 0; display: grid; gap: 12px; }
    .entry { background: var(--card); border-radius: 10px; padding: 14px; display: grid; gap: 4px; }
    .entry form { display: grid; gap: 8px; }
    .entry-date { font-weight: 700; }
    .note { margin: 6px 0 0; color: var(--muted); font-size: 0.9rem; }

    .calendar { display: grid; grid-template-columns: repeat(7, 1fr); gap: 4px; margin-top: 12px; }
    .weekday { text-align: center; font-weight: 700; padding: 6px; }
    .day {
      min-height: 84px;
      border: 1px solid var(--line);
      border-radius: 8px;
      padding: 6px;
      display: flex;
      flex-direction: column;
      align-items: center;
      justify-content: center;
      position: relative;
    }
    .day.empty { background: var(--bg); }
    .day.blank { border: none; }
    .day.today { border: 2px solid var(--accent); }
    .day.today .day-number { font-weight: 700; }
    .day-number { position: absolute; top: 4px; left: 6px; font-size: 0.8rem; }
    .day .emoji { font-size: 1.4rem; }
    .day-label { font-size: 0.7rem; }

    .chart { width: 100%; height: 260px; display: block; }
    .chart-line { fill: none; stroke: #8884d8; stroke-width: 2; }
    .chart-point { fill: var(--panel); stroke: #8884d8; stroke-width: 2; }
    .chart-grid { stroke: var(--line); stroke-dasharray: 3 3; }
    .chart-label { fill: var(--muted); font-size: 11px; }

    .shares { list-style: none; padding: 0; display: grid; gap: 8px; }
    .bar { height: 6px; background: var(--soft); border-radius: 999px; overflow: hidden; }
    .bar span { display: block; height: 100%; background: var(--accent); }

    .toast {
      background: #22c55e;
      color: white;
      padding: 12px 16px;
      border-radius: 10px;
      box-shadow: var(--shadow);
      transition: opacity 300ms ease;
    }
    .toast.hidden { opacity: 0; }

    @media (max-width: 700px) {
      .shell { flex-direction: column; }
      .sidebar { width: 100%; flex-direction: row; overflow-x: auto; }
    }
  </style>
</head>
<body>
  <div class="shell">
    <nav class="sidebar">{{NAV}}</nav>
    <main>
      <header><h1>Mood Tracker</h1></header>
      {{TOAST}}
      {{CONTENT}}
      {{STATS}}
    </main>
  </div>
  <script>
    const toast = document.getElementById('toast');
    if (toast) {
      setTimeout(() => toast.classList.add('hidden'), 2500);
      history.replaceState(null, '', '/?view=add');
    }
  </script>
</body>
</html>
"#;
