use ingredientiq::{AnalysisDetails, AnalysisResult, DictionaryEntry, Judgement, Status, normalize};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

fn status_color(status: Status) -> &'static str {
    match status {
        Status::Green => ansi::GREEN,
        Status::Yellow => ansi::YELLOW,
        Status::Red => ansi::RED,
        Status::Unknown => ansi::GRAY,
    }
}

pub fn print_run(input: &str, result: &AnalysisResult, details: Option<&AnalysisDetails>, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚗  Analyzing: \"{}\"", preview(input, 60)), ansi::CYAN)));

    if let Some(details) = details {
        println!("\n{}", palette.paint("━━━ Tokens ━━━", ansi::GRAY));
        print_traces(details, &palette);
    }

    println!("\n{}", palette.paint("━━━ Buckets ━━━", ansi::GRAY));
    if result.normalized_tokens.is_empty() {
        println!("{}", palette.dim("  No ingredients found"));
        println!("\n{}", palette.paint("Possible reasons:", ansi::YELLOW));
        println!("  • The list only contained parentheticals or a \"may contain\" section");
        println!("  • Every token was a single character");
    } else {
        for status in Status::ALL {
            print_bucket(status, result.buckets.get(status), &palette);
        }
    }

    println!("\n{}", palette.paint("━━━ Score ━━━", ansi::GRAY));
    let counts = &result.counts;
    println!(
        "  {}  {}  {} {}  {} {}  {} {}  {} {}",
        palette.bold(palette.paint(format!("{:>3}/100", result.score), score_color(result.score))),
        palette.dim("│"),
        palette.paint("green", ansi::GREEN),
        counts.green,
        palette.paint("yellow", ansi::YELLOW),
        counts.yellow,
        palette.paint("red", ansi::RED),
        counts.red,
        palette.paint("unknown", ansi::GRAY),
        counts.unknown,
    );
    println!("  {} {}", palette.dim("dictionary:"), palette.paint(&result.dictionary_version, ansi::BLUE));

    if let Some(details) = details {
        let m = &details.metrics;
        println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
        println!(
            "  Total: {}  │  Tokenize: {}  │  Classify: {}  │  Score: {}",
            palette.paint(format!("{:?}", m.total), ansi::GREEN),
            palette.paint(format!("{:?}", m.tokenize), ansi::CYAN),
            palette.paint(format!("{:?}", m.classify), ansi::CYAN),
            palette.dim(format!("{:?}", m.score)),
        );
        println!(
            "  {}",
            palette.dim(format!(
                "{} tokens, {} duplicates, {} dictionary keys",
                details.raw_tokens(),
                details.duplicates(),
                details.dictionary_keys
            ))
        );
    }
    println!();
}

pub fn print_search(query: &str, hits: &[&DictionaryEntry], color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("🔎 Search: \"{}\"", query), ansi::CYAN)));
    println!("\n{}", palette.paint("━━━ Matches ━━━", ansi::GRAY));

    if hits.is_empty() {
        println!("{}", palette.dim("  No entries matched"));
    }
    for (idx, entry) in hits.iter().enumerate() {
        println!(
            "  {} {} {} {}",
            palette.paint(format!("[{}]", idx), ansi::GRAY),
            palette.bold(palette.paint(&entry.inci, status_color(entry.status))),
            palette.dim("│"),
            palette.paint(entry.status.as_str(), status_color(entry.status)),
        );
        if !entry.aliases.is_empty() {
            println!("      {} {}", palette.dim("aliases:"), palette.paint(entry.aliases.join(", "), ansi::BLUE));
        }
        if !entry.why.is_empty() {
            println!("      {} {}", palette.dim("why:"), entry.why);
        }
    }
    println!();
}

fn print_bucket(status: Status, judgements: &[Judgement], palette: &ansi::Palette) {
    let header = format!("{} ({})", status.as_str(), judgements.len());
    if judgements.is_empty() {
        println!("  {}", palette.dim(header));
        return;
    }
    println!("  {}", palette.bold(palette.paint(header, status_color(status))));

    for judgement in judgements {
        let mut line = format!("    {}", palette.paint(&judgement.normalized, status_color(status)));
        if normalize(&judgement.name) != judgement.normalized {
            line.push_str(&format!(" {}", palette.dim(format!("← {}", judgement.name))));
        }
        println!("{line}");
        if let Some(why) = &judgement.why {
            println!("      {}", palette.dim(why));
        }
    }
}

fn print_traces(details: &AnalysisDetails, palette: &ansi::Palette) {
    if details.traces.is_empty() {
        println!("{}", palette.dim("  No tokens produced"));
        return;
    }

    for (idx, trace) in details.traces.iter().enumerate() {
        let outcome = if trace.duplicate {
            palette.dim("duplicate")
        } else {
            match trace.matched {
                Some(kind) => palette.paint(kind, ansi::BLUE),
                None => palette.dim("no match"),
            }
        };
        println!(
            "  {} {} {} {}",
            palette.paint(format!("[{}]", idx), ansi::GRAY),
            palette.paint(&trace.token, ansi::CYAN),
            palette.dim("→"),
            outcome,
        );
    }
}

fn score_color(score: u8) -> &'static str {
    match score {
        80..=100 => ansi::GREEN,
        50..=79 => ansi::YELLOW,
        _ => ansi::RED,
    }
}

fn preview(s: &str, max: usize) -> String {
    let flat = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max {
        return flat;
    }
    let mut out: String = flat.chars().take(max).collect();
    out.push('…');
    out
}
