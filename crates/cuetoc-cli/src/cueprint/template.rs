use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // %[flags][width][.precision]<conversion>
    static ref CONVERSION: Regex = Regex::new(r"(?s)%([-+ 0#]*)(\d*)(?:\.(\d*))?(.)").unwrap();
}

/// Value a conversion character resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// Unset text renders as an empty string
    Text(Option<&'a str>),
    Number(usize),
    Char(char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub flags: String,
    pub width: Option<usize>,
    pub precision: Option<usize>,
    pub key: char,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Field(Conversion),
}

/// A printf-like template whose conversion characters name disc or track fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(text: &str) -> Self {
        let mut segments = Vec::new();
        let mut last = 0;

        for captures in CONVERSION.captures_iter(text) {
            let Some(whole) = captures.get(0) else {
                continue;
            };
            if whole.start() > last {
                segments.push(Segment::Literal(text[last..whole.start()].to_string()));
            }

            let number = |i: usize| {
                captures
                    .get(i)
                    .and_then(|m| if m.as_str().is_empty() { None } else { m.as_str().parse().ok() })
            };
            let precision = match captures.get(3) {
                // a lone '.' means precision 0
                Some(m) => Some(m.as_str().parse().unwrap_or(0)),
                None => None,
            };

            segments.push(Segment::Field(Conversion {
                flags: captures[1].to_string(),
                width: number(2),
                precision,
                key: captures[4].chars().next().unwrap_or('%'),
            }));
            last = whole.end();
        }

        if last < text.len() {
            segments.push(Segment::Literal(text[last..].to_string()));
        }

        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn render<'a>(&self, lookup: impl Fn(char) -> FieldValue<'a>) -> String {
        let mut output = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => output.push_str(text),
                Segment::Field(conversion) => output.push_str(&conversion.format(lookup(conversion.key))),
            }
        }
        output
    }
}

impl Conversion {
    fn has_flag(&self, flag: char) -> bool {
        self.flags.contains(flag)
    }

    pub fn format(&self, value: FieldValue<'_>) -> String {
        let left = self.has_flag('-');

        let body = match value {
            FieldValue::Text(text) => {
                let text = text.unwrap_or("");
                match self.precision {
                    Some(precision) => text.chars().take(precision).collect(),
                    None => text.to_string(),
                }
            }
            FieldValue::Char(c) => c.to_string(),
            FieldValue::Number(n) => {
                let mut digits = n.to_string();
                if let Some(precision) = self.precision {
                    digits = format!("{digits:0>precision$}");
                }

                let sign = if self.has_flag('+') {
                    "+"
                } else if self.has_flag(' ') {
                    " "
                } else {
                    ""
                };

                if self.has_flag('0') && !left && self.precision.is_none() {
                    let width = self.width.unwrap_or(0).saturating_sub(sign.len());
                    digits = format!("{digits:0>width$}");
                }

                format!("{sign}{digits}")
            }
        };

        let width = self.width.unwrap_or(0);
        if left {
            format!("{body:<width$}")
        } else {
            format!("{body:>width$}")
        }
    }
}

/// Replaces backslash escapes with the characters they stand for.
pub fn translate_escapes(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            output.push(c);
            continue;
        }

        match chars.next() {
            Some('a') => output.push('\u{07}'),
            Some('b') => output.push('\u{08}'),
            Some('f') => output.push('\u{0c}'),
            Some('n') => output.push('\n'),
            Some('r') => output.push('\r'),
            Some('t') => output.push('\t'),
            Some('v') => output.push('\u{0b}'),
            Some('0') => output.push('\0'),
            Some(other) => output.push(other),
            None => output.push('\\'),
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conversion(spec: &str) -> Conversion {
        match &Template::parse(spec).segments()[0] {
            Segment::Field(conversion) => conversion.clone(),
            other => panic!("expected a field, got {other:?}"),
        }
    }

    #[test]
    fn splits_literals_and_fields() {
        let template = Template::parse("Track %n: %-10.4t!");
        assert_eq!(
            template.segments(),
            &[
                Segment::Literal("Track ".to_string()),
                Segment::Field(Conversion {
                    flags: String::new(),
                    width: None,
                    precision: None,
                    key: 'n',
                }),
                Segment::Literal(": ".to_string()),
                Segment::Field(Conversion {
                    flags: "-".to_string(),
                    width: Some(10),
                    precision: Some(4),
                    key: 't',
                }),
                Segment::Literal("!".to_string()),
            ]
        );
    }

    #[test]
    fn pads_and_truncates_text() {
        assert_eq!(conversion("%-8s").format(FieldValue::Text(Some("Loomer"))), "Loomer  ");
        assert_eq!(conversion("%8s").format(FieldValue::Text(Some("Loomer"))), "  Loomer");
        assert_eq!(conversion("%.4s").format(FieldValue::Text(Some("Loveless"))), "Love");
        assert_eq!(conversion("%3s").format(FieldValue::Text(None)), "   ");
    }

    #[test]
    fn formats_numbers_like_printf() {
        assert_eq!(conversion("%02n").format(FieldValue::Number(7)), "07");
        assert_eq!(conversion("%+n").format(FieldValue::Number(7)), "+7");
        assert_eq!(conversion("%.3n").format(FieldValue::Number(7)), "007");
        assert_eq!(conversion("%-3n").format(FieldValue::Number(7)), "7  ");
        assert_eq!(conversion("%+04n").format(FieldValue::Number(7)), "+007");
    }

    #[test]
    fn renders_through_lookup() {
        let template = Template::parse("%n/%N %% %t");
        let rendered = template.render(|key| match key {
            'n' => FieldValue::Number(2),
            'N' => FieldValue::Number(9),
            't' => FieldValue::Text(Some("Loomer")),
            other => FieldValue::Char(other),
        });
        assert_eq!(rendered, "2/9 % Loomer");
    }

    #[test]
    fn trailing_percent_is_literal() {
        let template = Template::parse("100%");
        assert_eq!(template.render(FieldValue::Char), "100%");
    }

    #[test]
    fn translates_escapes() {
        assert_eq!(translate_escapes(r#"a\tb\nc\\d\"e"#), "a\tb\nc\\d\"e");
        assert_eq!(translate_escapes(r"end\"), "end\\");
    }
}
