use regex::Regex;
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("static email pattern")
});

/// A refinement on a text field. Each check may carry a custom message.
#[derive(Debug, Clone)]
pub enum TextCheck {
    MinLength { min: usize, message: Option<String> },
    MaxLength { max: usize, message: Option<String> },
    Email { message: Option<String> },
    Pattern { regex: Regex, message: Option<String> },
}

impl TextCheck {
    pub fn min_length(min: usize) -> Self {
        Self::MinLength { min, message: None }
    }

    pub fn max_length(max: usize) -> Self {
        Self::MaxLength { max, message: None }
    }

    pub fn email() -> Self {
        Self::Email { message: None }
    }

    pub fn pattern(regex: Regex) -> Self {
        Self::Pattern {
            regex,
            message: None,
        }
    }

    pub fn with_message(mut self, text: impl Into<String>) -> Self {
        let slot = match &mut self {
            Self::MinLength { message, .. }
            | Self::MaxLength { message, .. }
            | Self::Email { message }
            | Self::Pattern { message, .. } => message,
        };
        *slot = Some(text.into());
        self
    }

    pub fn run(&self, value: &str) -> Result<(), String> {
        match self {
            Self::MinLength { min, message } => {
                if value.chars().count() < *min {
                    return Err(message.clone().unwrap_or_else(|| {
                        format!("String must contain at least {min} character(s)")
                    }));
                }
            }
            Self::MaxLength { max, message } => {
                if value.chars().count() > *max {
                    return Err(message.clone().unwrap_or_else(|| {
                        format!("String must contain at most {max} character(s)")
                    }));
                }
            }
            Self::Email { message } => {
                if !EMAIL.is_match(value) {
                    return Err(message.clone().unwrap_or_else(|| "Invalid email".to_string()));
                }
            }
            Self::Pattern { regex, message } => {
                if !regex.is_match(value) {
                    return Err(message.clone().unwrap_or_else(|| "Invalid".to_string()));
                }
            }
        }
        Ok(())
    }
}

/// Runs every check and collects all failures, in declaration order.
pub fn run_checks(checks: &[TextCheck], value: &str) -> Vec<String> {
    checks
        .iter()
        .filter_map(|check| check.run(value).err())
        .collect()
}
