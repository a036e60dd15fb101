/// Numeric salary bounds as published by an API-backed source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalaryRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub currency: Option<String>,
}

impl SalaryRange {
    /// `USD 60,000 - 120,000`, or `$60,000 - $120,000` without a currency code.
    ///
    /// `None` unless a minimum is listed; a lone minimum renders one-sided.
    pub fn grouped(&self) -> Option<String> {
        let min = listed(self.min)?;
        let rendered = match (self.currency(), listed(self.max)) {
            (Some(code), Some(max)) => {
                format!("{code} {} - {}", thousands(min), thousands(max))
            }
            (Some(code), None) => format!("{code} {}", thousands(min)),
            (None, Some(max)) => format!("${} - ${}", thousands(min), thousands(max)),
            (None, None) => format!("${}", thousands(min)),
        };
        Some(rendered)
    }

    /// `💰 $60k - $120k`; non-dollar currencies render as `💰 EUR 60k - 120k`.
    pub fn compact(&self) -> Option<String> {
        let min = listed(self.min)?;
        let max = listed(self.max);
        let rendered = match self.currency() {
            None | Some("USD") => match max {
                Some(max) => format!("💰 ${}k - ${}k", kilo(min), kilo(max)),
                None => format!("💰 ${}k", kilo(min)),
            },
            Some(code) => match max {
                Some(max) => format!("💰 {code} {}k - {}k", kilo(min), kilo(max)),
                None => format!("💰 {code} {}k", kilo(min)),
            },
        };
        Some(rendered)
    }

    fn currency(&self) -> Option<&str> {
        self.currency
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }
}

// Zero and negative bounds mean "not listed" on every source we read.
fn listed(bound: Option<f64>) -> Option<f64> {
    bound.filter(|v| v.is_finite() && *v > 0.0)
}

fn kilo(value: f64) -> u64 {
    (value / 1000.0).floor() as u64
}

/// en-US grouping with at most three fraction digits.
fn thousands(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    let whole = rounded.trunc();
    let mut out = group_digits(whole as u64);

    let fraction = format!("{:.3}", rounded - whole);
    let fraction = fraction.trim_start_matches('0').trim_end_matches('0');
    if fraction.len() > 1 {
        out.push_str(fraction);
    }
    out
}

fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
