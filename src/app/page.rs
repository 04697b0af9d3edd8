use crate::app::form::{Notice, NoticeVariant, View};
use crate::config::toml_config::{PageConfig, DEFAULT_SUBTITLE, DEFAULT_TITLE};
use std::fmt::Write;

/// Static page around the form: heading, sub-heading and the current view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    title: String,
    subtitle: String,
}

impl Default for Page {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE, DEFAULT_SUBTITLE)
    }
}

impl Page {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
        }
    }

    pub fn from_config(config: &PageConfig) -> Self {
        Self::new(config.title.clone(), config.subtitle.clone())
    }

    pub fn render(&self, view: &View) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_page(&mut out, view);
        out
    }

    fn write_page(&self, out: &mut String, view: &View) -> std::fmt::Result {
        writeln!(out, "{}", self.title)?;
        writeln!(out, "{}", self.subtitle)?;
        writeln!(out)?;

        match view {
            View::Input(input) => {
                writeln!(out, "Join Your Fellowship Family")?;
                writeln!(
                    out,
                    "Enter your details to be assigned to a loving fellowship family"
                )?;
                writeln!(out)?;
                writeln!(out, "  Full Name:    {}", input.name)?;
                writeln!(out, "  Phone Number: {}", input.phone)?;
                if input.submit_disabled {
                    writeln!(out, "  ( {} )", input.submit_label)?;
                } else {
                    writeln!(out, "  [ {} ]", input.submit_label)?;
                }
            }
            View::Result(result) => {
                writeln!(out, "Welcome to Your Family! 🎉")?;
                writeln!(out, "You've been assigned to:")?;
                writeln!(out, "  {}", result.family_name)?;
                writeln!(out)?;
                writeln!(
                    out,
                    "Your fellowship family will be in touch soon. Welcome to our community!"
                )?;
                writeln!(out, "  [ {} ]", result.reset_label)?;
            }
        }
        Ok(())
    }
}

pub fn render_notice(notice: &Notice) -> String {
    let marker = match notice.variant {
        NoticeVariant::Default => "✅",
        NoticeVariant::Destructive => "❌",
    };
    format!("{} {}\n   {}", marker, notice.title, notice.description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::form::{InputView, ResultView, RESET_LABEL, SUBMITTING_LABEL, SUBMIT_LABEL};

    #[test]
    fn test_render_input_view() {
        let page = Page::default();
        let text = page.render(&View::Input(InputView {
            name: "Ada".to_string(),
            phone: String::new(),
            submit_label: SUBMIT_LABEL,
            submit_disabled: false,
        }));

        assert!(text.starts_with("Cherubim & Seraphim Campus Fellowship\nUnilag Chapter - Family Assignment\n"));
        assert!(text.contains("Full Name:    Ada"));
        assert!(text.contains("[ Join Fellowship ]"));
    }

    #[test]
    fn test_render_pending_input_view() {
        let text = Page::default().render(&View::Input(InputView {
            name: "Ada".to_string(),
            phone: "0801".to_string(),
            submit_label: SUBMITTING_LABEL,
            submit_disabled: true,
        }));

        assert!(text.contains("( Assigning Family... )"));
        assert!(!text.contains("[ Join Fellowship ]"));
    }

    #[test]
    fn test_render_result_view_with_custom_headings() {
        let page = Page::from_config(&PageConfig {
            title: "Campus Fellowship".to_string(),
            subtitle: "Family Assignment".to_string(),
        });
        let text = page.render(&View::Result(ResultView {
            family_name: "Grace Family".to_string(),
            reset_label: RESET_LABEL,
        }));

        assert!(text.starts_with("Campus Fellowship\nFamily Assignment\n"));
        assert!(text.contains("You've been assigned to:\n  Grace Family\n"));
        assert!(text.contains("[ Submit Another Registration ]"));
    }
}
