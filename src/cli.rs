use clap::Parser;
use kurbo::Size;

/// Drives one indicator to a target progress and logs every sampled frame.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Visual strategy: basic, inset, filled or fireworks.
    #[arg(short, long, default_value = "filled")]
    pub strategy: String,

    /// Additional content: percentage, stop, emitter, or several joined with `+`.
    ///
    /// Required by the basic and inset strategies.
    #[arg(short, long)]
    pub content: Option<String>,

    /// Target progress; clamped to 0..=1.
    #[arg(long, default_value_t = 1.)]
    pub to: f64,

    /// Commit the target without animating.
    #[arg(long)]
    pub no_animate: bool,

    /// Display refresh rate in Hz.
    #[arg(long, default_value_t = 60.)]
    pub refresh_rate: f64,

    /// Indicator bounds as WIDTHxHEIGHT.
    #[arg(long, default_value = "120x120", value_parser = parse_size)]
    pub size: Size,

    /// Animation clock rate; values below 1 slow the transition down.
    #[arg(long, default_value_t = 1., value_parser = parse_rate)]
    pub rate: f64,

    /// Transition duration in milliseconds.
    #[arg(long, default_value_t = crate::config::DEFAULT_TRANSITION_MS)]
    pub duration_ms: u32,
}

pub fn parse_size(value: &str) -> Result<Size, String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got `{value}`"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.)
            .ok_or_else(|| format!("invalid dimension `{v}`"))
    };
    Ok(Size::new(parse(w)?, parse(h)?))
}

pub fn parse_rate(value: &str) -> Result<f64, String> {
    // 速率为零时过渡永远不会结束
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.)
        .ok_or_else(|| format!("rate must be a positive number, got `{value}`"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sizes() {
        assert_eq!(parse_size("120x80"), Ok(Size::new(120., 80.)));
        assert_eq!(parse_size("10X10"), Ok(Size::new(10., 10.)));
        insta::assert_snapshot!(parse_size("120").unwrap_err(), @"expected WIDTHxHEIGHT, got `120`");
        insta::assert_snapshot!(parse_size("ax2").unwrap_err(), @"invalid dimension `a`");
    }

    #[test]
    fn rejects_non_positive_rates() {
        assert_eq!(parse_rate("0.25"), Ok(0.25));
        insta::assert_snapshot!(parse_rate("0").unwrap_err(), @"rate must be a positive number, got `0`");
        assert!(parse_rate("-1").is_err());
        assert!(parse_rate("inf").is_err());

        let err = Cli::try_parse_from(["circular-progress-sampler", "--rate", "0"]);
        assert!(err.is_err());
    }

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["circular-progress-sampler"]);
        assert_eq!(cli.strategy, "filled");
        assert_eq!(cli.to, 1.);
        assert_eq!(cli.size, Size::new(120., 120.));
        assert_eq!(cli.duration_ms, 400);
        assert_eq!(cli.rate, 1.);
        assert!(!cli.no_animate);

        let cli = Cli::parse_from([
            "circular-progress-sampler",
            "--strategy",
            "inset",
            "--content",
            "stop",
            "--to",
            "0.8",
            "--size",
            "120x80",
        ]);
        assert_eq!(cli.content.as_deref(), Some("stop"));
        assert_eq!(cli.size, Size::new(120., 80.));
    }
}
