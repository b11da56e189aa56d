//! Request payload and instruction text for the caption model.

use otd_core::entities::{CaptionRequestItem, EventGroup};
use otd_core::markup::strip_tags;

use crate::error::CaptionError;

/// Descriptions this short (in characters, after cleaning) carry no signal.
pub const MIN_DESCRIPTION_CHARS: usize = 10;

const INSTRUCTION: &str = "\
Je bent een AI-assistent voor een historisch sportfotoarchief over de voetbalclub Feyenoord.
Voor elke gebeurtenis hieronder, analyseer de bijbehorende fotobeschrijvingen.
Genereer een korte, pakkende kop.
Indien de gebeurtenis een voetbalwedstrijd is, formuleer dan een korte tekst met de wedstrijd en de uitslag (bijv. \"Feyenoord - Telstar, 2-1\"). Als het geen wedstrijd is, of de uitslag is onbekend, laat dit veld dan een lege string.
BELANGRIJK: Gebruik altijd de correcte spelling \"Feyenoord\".
De output moet een JSON-array zijn, waarbij elk object overeenkomt met een input-gebeurtenis en de velden \"date\", \"headline\", en \"matchInfo\" bevat.";

/// Per-group payload: canonical date plus cleaned descriptions longer than
/// [`MIN_DESCRIPTION_CHARS`].
#[must_use]
pub fn caption_payload(groups: &[EventGroup]) -> Vec<CaptionRequestItem> {
    groups
        .iter()
        .map(|group| CaptionRequestItem {
            date: group.date.to_string(),
            descriptions: group
                .photos
                .iter()
                .map(|photo| strip_tags(&photo.description))
                .filter(|d| d.chars().count() > MIN_DESCRIPTION_CHARS)
                .collect(),
        })
        .collect()
}

/// Full prompt: instruction block followed by the pretty-printed payload.
///
/// # Errors
///
/// Returns [`CaptionError::Parse`] if the payload cannot be serialized.
pub fn build_prompt(payload: &[CaptionRequestItem]) -> Result<String, CaptionError> {
    let data = serde_json::to_string_pretty(payload)
        .map_err(|e| CaptionError::Parse(format!("payload serialization failed: {e}")))?;
    Ok(format!("{INSTRUCTION}\n\nGegevens:\n{data}\n"))
}

#[cfg(test)]
mod tests {
    use otd_core::entities::{NO_DESCRIPTION, PhotoRecord};
    use pretty_assertions::assert_eq;

    use super::*;

    fn photo(id: u64, description: &str) -> PhotoRecord {
        PhotoRecord {
            id,
            title: format!("File:{id}.jpg"),
            image_url: format!("https://upload.example/{id}.jpg"),
            source_page_url: format!("https://commons.example/File:{id}"),
            description: description.to_string(),
            date: "1970-05-06".parse().unwrap(),
        }
    }

    #[test]
    fn payload_strips_markup_and_drops_short_descriptions() {
        let group = EventGroup {
            date: "1970-05-06".parse().unwrap(),
            photos: vec![
                photo(1, "<p>Feyenoord wint de Wereldbeker in Milaan</p>"),
                photo(2, "<b>Kuip</b>"),
                photo(3, "0123456789"),
                photo(4, "  01234567890  "),
                photo(5, NO_DESCRIPTION),
            ],
        };

        let payload = caption_payload(&[group]);
        assert_eq!(payload.len(), 1);
        assert_eq!(payload[0].date, "1970-05-06");
        assert_eq!(
            payload[0].descriptions,
            [
                "Feyenoord wint de Wereldbeker in Milaan",
                "01234567890",
                NO_DESCRIPTION,
            ]
        );
    }

    #[test]
    fn group_without_usable_descriptions_is_still_sent() {
        let group = EventGroup {
            date: "1970-05-06".parse().unwrap(),
            photos: vec![photo(1, "kort")],
        };
        let payload = caption_payload(&[group]);
        assert_eq!(payload.len(), 1);
        assert!(payload[0].descriptions.is_empty());
    }

    #[test]
    fn prompt_contains_instruction_and_data() {
        let payload = vec![CaptionRequestItem {
            date: "1970-05-06".into(),
            descriptions: vec!["Feyenoord wint de Wereldbeker".into()],
        }];
        let prompt = build_prompt(&payload).unwrap();
        assert!(prompt.starts_with("Je bent een AI-assistent"));
        assert!(prompt.contains("\"Feyenoord - Telstar, 2-1\""));
        assert!(prompt.contains("BELANGRIJK: Gebruik altijd de correcte spelling \"Feyenoord\"."));
        assert!(prompt.contains("Gegevens:\n[\n  {\n    \"date\": \"1970-05-06\""));
    }
}
