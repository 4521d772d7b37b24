use std::error::Error;
use std::io::IsTerminal;

use owo_colors::OwoColorize;
use regex::Regex;

use super::rich::RichError;

/// Formats RichError for CLI output
pub struct ErrorFormatter {
    verbose: bool,
    use_color: bool,
}

impl ErrorFormatter {
    /// Creates a new ErrorFormatter with default TTY detection
    pub fn new(verbose: bool) -> Self {
        Self::with_color_detection(verbose, Self::default_should_use_color)
    }

    /// Creates a new ErrorFormatter with injectable TTY detection for testing
    pub fn with_color_detection(verbose: bool, detect_color: fn() -> bool) -> Self {
        let use_color = detect_color();
        Self { verbose, use_color }
    }

    fn default_should_use_color() -> bool {
        std::io::stderr().is_terminal() && std::env::var("NO_COLOR").is_err()
    }

    /// Formats the error for display
    pub fn format(&self, error: &RichError) -> String {
        let plain = if self.verbose {
            self.format_verbose_plain(error)
        } else {
            self.format_simple_plain(error)
        };

        // Apply masking before color
        let masked = Self::mask_sensitive(&plain);

        if self.use_color {
            Self::apply_color(&masked)
        } else {
            masked
        }
    }

    fn format_simple_plain(&self, error: &RichError) -> String {
        let mut output = error.to_string();

        let context_lines = Self::format_context(error);
        if !context_lines.is_empty() {
            output.push('\n');
            output.push_str(&context_lines);
        }

        output
    }

    fn format_verbose_plain(&self, error: &RichError) -> String {
        let mut output = self.format_simple_plain(error);

        output.push_str("\n  |");
        output.push_str(&format!("\n  | Cause: {}", error.code().cause()));

        output.push_str("\n  |");
        output.push_str("\n  | Remediation:");
        for line in error.code().remediation().lines() {
            output.push_str(&format!("\n  |   {}", line));
        }

        let source_chain = Self::format_source_chain(error);
        if !source_chain.is_empty() {
            output.push_str("\n  |");
            output.push_str(&format!("\n  | Source chain:\n{}", source_chain));
        }

        output.push_str("\n  |");
        output.push_str("\n  = note: use `stash --help` for more information");

        output
    }

    fn format_context(error: &RichError) -> String {
        let ctx = error.context();
        let mut lines = Vec::new();

        // file_path -> url -> host -> additional
        if let Some(path) = &ctx.file_path {
            lines.push(format!("  --> {}", path.to_string_lossy()));
        }

        if let Some(url) = &ctx.url {
            lines.push(format!("  --> {}", url));
        }

        if let Some(host) = &ctx.host {
            lines.push(format!("  --> host: {}", host));
        }

        for (key, value) in &ctx.additional {
            lines.push(format!("  --> {}: {}", key, value));
        }

        lines.join("\n")
    }

    fn format_source_chain(error: &RichError) -> String {
        let mut chain = Vec::new();
        let mut current: Option<&(dyn std::error::Error + 'static)> = error.source();

        while let Some(err) = current {
            chain.push(format!("  |   - {}", err));
            current = err.source();
        }

        chain.join("\n")
    }

    /// Masks credentials that may leak through URLs and backend messages
    fn mask_sensitive(text: &str) -> String {
        let mut result = Self::mask_query_params(text);
        result = Self::mask_headers(&result);
        result = Self::mask_jwt(&result);
        Self::mask_sensitive_paths(&result)
    }

    fn mask_query_params(text: &str) -> String {
        let re = Regex::new(r"([?&])([^=&\s]+)=([^&\s]+)").unwrap();
        re.replace_all(text, "$1$2=***").to_string()
    }

    fn mask_headers(text: &str) -> String {
        let bearer = Regex::new(r"(?i)(Authorization:\s*Bearer\s+)\S+").unwrap();
        let apikey = Regex::new(r"(?i)(apikey:\s*)\S+").unwrap();
        let result = bearer.replace_all(text, "$1***");
        apikey.replace_all(&result, "$1***").to_string()
    }

    fn mask_jwt(text: &str) -> String {
        let re = Regex::new(r"eyJ[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]*").unwrap();
        re.replace_all(text, "<jwt>").to_string()
    }

    fn mask_sensitive_paths(text: &str) -> String {
        // URL 中のパスは対象外
        let env_re = Regex::new(r"(?:^|[^:/])(/(?:[^/\s]+/)*\.env(?:\.[^\s]*)?)").unwrap();
        env_re
            .replace_all(text, |caps: &regex::Captures| {
                let full = &caps[0];
                let path = &caps[1];
                full.replace(path, "<sensitive-path>")
            })
            .to_string()
    }

    fn apply_color(text: &str) -> String {
        let mut result = String::new();

        for line in text.lines() {
            if !result.is_empty() {
                result.push('\n');
            }

            if line.starts_with("error[") {
                let bracket_end = line.find(']').map_or(0, |i| i + 1);
                let (error_prefix, rest) = line.split_at(bracket_end);
                result.push_str(&format!("{}{}", error_prefix.red().bold(), rest.bold()));
            } else if line.starts_with("  -->") {
                result.push_str(&line.blue().to_string());
            } else if line.starts_with("  | Cause:") {
                result.push_str(&line.yellow().to_string());
            } else if line.starts_with("  | Remediation:") {
                result.push_str(&line.green().to_string());
            } else if line.starts_with("  = note:") || line.starts_with("  |   -") {
                result.push_str(&line.dimmed().to_string());
            } else {
                result.push_str(line);
            }
        }

        result
    }
}
