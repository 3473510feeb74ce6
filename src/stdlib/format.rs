//! `numberFormat` and the decimal pattern subset it understands.
//!
//! A pattern is `prefix body suffix`, where the body is built from `#`, `0`, `,` and `.`.
//! The digits after the last `,` give the primary grouping size; those between the last
//! two commas give the secondary size, so `#,##,###` groups as `12,34,567`.

use super::{define, number_arg, string_arg};
use crate::ast::Node;
use crate::context::Context;
use crate::interpreter::{Interpreter, RuntimeError};
use crate::value::Value;

pub const DEFAULT_PATTERN: &str = "#,##,###";

pub fn register(scope: &mut Context) {
    define(scope, "numberFormat", &[], 2, number_format);
}

fn number_format(interpreter: &Interpreter, arguments: &[Node]) -> Result<Value, RuntimeError> {
    if arguments.len() > 2 {
        return Ok(Value::from("Incorrect argument size"));
    }
    let number = number_arg(interpreter, arguments, 0)?.ok_or_else(|| {
        RuntimeError::InvalidArgument {
            function: "numberFormat".to_string(),
            message: "expected a number".to_string(),
        }
    })?;
    let pattern = string_arg(interpreter, arguments, 1)?;
    let pattern = DecimalPattern::parse(pattern.as_deref().unwrap_or(DEFAULT_PATTERN));
    Ok(Value::String(pattern.format(number)))
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecimalPattern {
    prefix: String,
    suffix: String,
    /// Zero disables grouping.
    primary_group: usize,
    /// Zero, or an empty group such as `#,,###`, repeats the primary size.
    secondary_group: usize,
    min_integer_digits: usize,
    min_fraction_digits: usize,
    max_fraction_digits: usize,
}

fn is_body_char(c: char) -> bool {
    matches!(c, '#' | '0' | ',' | '.')
}

impl DecimalPattern {
    pub fn parse(pattern: &str) -> DecimalPattern {
        let start = pattern.find(is_body_char).unwrap_or(pattern.len());
        let end = pattern[start..]
            .find(|c: char| !is_body_char(c))
            .map_or(pattern.len(), |at| start + at);
        let body = &pattern[start..end];

        let (integer, fraction) = match body.find('.') {
            Some(at) => (&body[..at], &body[at + 1..]),
            None => (body, ""),
        };
        let groups: Vec<&str> = integer.split(',').collect();
        let (primary_group, secondary_group) = match groups.as_slice() {
            [_] => (0, 0),
            [.., secondary, primary] if groups.len() > 2 && !secondary.is_empty() => {
                (primary.len(), secondary.len())
            }
            [.., primary] => (primary.len(), primary.len()),
            [] => (0, 0),
        };

        DecimalPattern {
            prefix: pattern[..start].to_string(),
            suffix: pattern[end..].to_string(),
            primary_group,
            secondary_group,
            min_integer_digits: integer.matches('0').count(),
            min_fraction_digits: fraction.matches('0').count(),
            max_fraction_digits: fraction.matches(|c: char| c == '0' || c == '#').count(),
        }
    }

    pub fn format(&self, number: f64) -> String {
        let sign = if number.is_sign_negative() && number != 0.0 { "-" } else { "" };
        if number.is_nan() {
            return format!("{}NaN{}", self.prefix, self.suffix);
        }
        if number.is_infinite() {
            return format!("{}{}∞{}", sign, self.prefix, self.suffix);
        }

        // Rounds half to even.
        let fixed = format!("{:.*}", self.max_fraction_digits, number.abs());
        let (integer, fraction) = match fixed.split_once('.') {
            Some((integer, fraction)) => (integer, fraction),
            None => (fixed.as_str(), ""),
        };

        let mut fraction = fraction.to_string();
        while fraction.len() > self.min_fraction_digits && fraction.ends_with('0') {
            fraction.pop();
        }
        let mut digits = integer.trim_start_matches('0').to_string();
        if digits.len() < self.min_integer_digits {
            digits = format!("{}{}", "0".repeat(self.min_integer_digits - digits.len()), digits);
        }
        if digits.is_empty() && fraction.is_empty() {
            digits.push('0');
        }

        let mut out = format!("{}{}{}", sign, self.prefix, self.group(&digits));
        if !fraction.is_empty() {
            out.push('.');
            out.push_str(&fraction);
        }
        out.push_str(&self.suffix);
        out
    }

    fn group(&self, digits: &str) -> String {
        if self.primary_group == 0 || digits.len() <= self.primary_group {
            return digits.to_string();
        }
        let split = digits.len() - self.primary_group;
        let (head, tail) = digits.split_at(split);
        let mut groups = vec![tail];
        let secondary = if self.secondary_group == 0 {
            self.primary_group
        } else {
            self.secondary_group
        };
        let mut rest = head;
        while rest.len() > secondary {
            let (left, right) = rest.split_at(rest.len() - secondary);
            groups.push(right);
            rest = left;
        }
        if !rest.is_empty() {
            groups.push(rest);
        }
        groups.reverse();
        groups.join(",")
    }
}

#[cfg(test)]
mod format_tests {
    use crate::stdlib::format::{DecimalPattern, DEFAULT_PATTERN};
    use crate::stdlib::run;
    use crate::value::Value;
    use pretty_assertions::assert_eq;

    fn format(number: f64, pattern: &str) -> String {
        DecimalPattern::parse(pattern).format(number)
    }

    #[test]
    fn default_pattern_groups_in_twos_after_the_first_three() {
        assert_eq!(format(456786.0, DEFAULT_PATTERN), "4,56,786");
        assert_eq!(format(123456789.0, DEFAULT_PATTERN), "12,34,56,789");
        assert_eq!(format(1001.0, DEFAULT_PATTERN), "1,001");
        assert_eq!(format(999.0, DEFAULT_PATTERN), "999");
    }

    #[test]
    fn fractions_are_rounded_away() {
        assert_eq!(format(123456.789, DEFAULT_PATTERN), "1,23,457");
        assert_eq!(format(1180.0000000000002, DEFAULT_PATTERN), "1,180");
    }

    #[test]
    fn custom_patterns() {
        assert_eq!(format(123456789.0, "#,###,000"), "123,456,789");
        assert_eq!(format(30000.0, "##,##,###"), "30,000");
        assert_eq!(format(1234567.0, "#,###"), "1,234,567");
        assert_eq!(format(9876543.0, "#"), "9876543");
        assert_eq!(format(1234.0, "#,###,000"), "1,234");
    }

    #[test]
    fn minimum_digits() {
        assert_eq!(format(5.0, "000"), "005");
        assert_eq!(format(0.0, "#"), "0");
        assert_eq!(format(1.5, "0.00"), "1.50");
        assert_eq!(format(1.256, "#.##"), "1.26");
        assert_eq!(format(1.2, "#.##"), "1.2");
    }

    #[test]
    fn prefix_and_suffix() {
        assert_eq!(format(1500.0, "₹#,##,###"), "₹1,500");
        assert_eq!(format(42.0, "#%"), "42%");
        assert_eq!(format(-1500.0, "₹#,###"), "-₹1,500");
    }

    #[test]
    fn pattern_parts() {
        let pattern = DecimalPattern::parse("#,##,##0.0#");
        assert_eq!(pattern.primary_group, 3);
        assert_eq!(pattern.secondary_group, 2);
        assert_eq!(pattern.min_integer_digits, 1);
        assert_eq!(pattern.min_fraction_digits, 1);
        assert_eq!(pattern.max_fraction_digits, 2);
    }

    #[test]
    fn empty_group_repeats_the_primary_size() {
        let pattern = DecimalPattern::parse("#,,###");
        assert_eq!(pattern.primary_group, 3);
        assert_eq!(pattern.secondary_group, 3);
        assert_eq!(format(1234567.0, "#,,###"), "1,234,567");
        assert_eq!(run("numberFormat(1234567, '#,,###')").unwrap(), Value::from("1,234,567"));

        let pattern = DecimalPattern {
            secondary_group: 0,
            ..DecimalPattern::parse("#,###")
        };
        assert_eq!(pattern.format(1234567.0), "1,234,567");
    }

    #[test]
    fn builtin_contract() {
        assert_eq!(run("numberFormat(456786)").unwrap(), Value::from("4,56,786"));
        assert_eq!(
            run("numberFormat(1, '#', 2)").unwrap(),
            Value::from("Incorrect argument size")
        );
        assert!(run("numberFormat('x')").is_err());
    }
}
