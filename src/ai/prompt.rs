//! Reusable prompts using Handlebars for templating.

use std::fmt;

use anyhow::Result;
use chrono::{Locale, NaiveDate, NaiveTime};
use handlebars::Handlebars;
use serde_json::json;

pub const CALENDAR_NAME: &str = "FamiliePrivatApp";

#[derive(Debug)]
pub enum Prompt {
    SystemInstruction,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl From<Prompt> for String {
    fn from(item: Prompt) -> String {
        format!("{:?}", item)
    }
}

const SYSTEM_INSTRUCTION_PROMPT: &str = r#"
Du er en dedikeret assistent for Google-kalenderen "{{calendar_name}}".
Du taler dansk.
Dagens dato er: {{today}}.

Dine opgaver:
1. Oprette begivenheder (kræver titel og tidspunkt).
2. Ændre begivenheder.
3. Slette begivenheder.
4. Vise/liste begivenheder.

Regler:
- Vær kort og præcis.
- Du må KUN styre denne ene kalender.
- Hvis brugeren beder om noget uden for din kontekst (f.eks. e-mail, nyheder), afvis venligt.
- Når du opretter begivenheder, gæt en varighed på 1 time, hvis intet andet er nævnt.
- Returner altid svar i ren tekst, men brug værktøjer (tools) til at udføre handlinger.
"#;

pub fn templates<'a>() -> Handlebars<'a> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    // Prompts are plain text, not HTML
    registry.register_escape_fn(handlebars::no_escape);
    registry
        .register_template_string(
            &Prompt::SystemInstruction.to_string(),
            SYSTEM_INSTRUCTION_PROMPT,
        )
        .expect("Failed to register template");
    registry
}

/// "mandag 3. marts 2025"
pub fn danish_date(date: NaiveDate) -> String {
    date.and_time(NaiveTime::MIN)
        .and_utc()
        .format_localized("%A %-d. %B %Y", Locale::da_DK)
        .to_string()
}

/// The calendar assistant's system instruction for `today`.
pub fn system_instruction(today: NaiveDate) -> Result<String> {
    let rendered = templates().render(
        &Prompt::SystemInstruction.to_string(),
        &json!({
            "calendar_name": CALENDAR_NAME,
            "today": danish_date(today),
        }),
    )?;
    Ok(rendered.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_danish_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        assert_eq!(danish_date(date), "mandag 3. marts 2025");
    }

    #[test]
    fn test_system_instruction() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        let instruction = system_instruction(date).unwrap();

        assert!(instruction.starts_with("Du er en dedikeret assistent"));
        assert!(instruction.contains(r#""FamiliePrivatApp""#));
        assert!(instruction.contains("Dagens dato er: mandag 3. marts 2025."));
        assert!(instruction.contains("varighed på 1 time"));
    }
}
