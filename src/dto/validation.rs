//! Validation helpers for DTOs.

use validator::ValidationError;

const MAX_DISPLAY_NAME_LENGTH: usize = 64;
const MAX_GUESS_LENGTH: usize = 128;

/// Validates a player display name: non-blank, at most 64 characters.
///
/// Names are free text with no identity behind them; the only constraints
/// are that the activity feed has something to show and that nobody pastes
/// a novel into it.
pub fn validate_display_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        let mut err = ValidationError::new("display_name_blank");
        err.message = Some("Player name must not be blank".into());
        return Err(err);
    }

    if name.chars().count() > MAX_DISPLAY_NAME_LENGTH {
        let mut err = ValidationError::new("display_name_length");
        err.message = Some(
            format!("Player name must be at most {MAX_DISPLAY_NAME_LENGTH} characters").into(),
        );
        return Err(err);
    }

    Ok(())
}

/// Validates raw guess text: non-blank after trimming, at most 128 characters.
pub fn validate_guess_text(guess: &str) -> Result<(), ValidationError> {
    if guess.trim().is_empty() {
        let mut err = ValidationError::new("guess_blank");
        err.message = Some("Guess must not be blank".into());
        return Err(err);
    }

    if guess.chars().count() > MAX_GUESS_LENGTH {
        let mut err = ValidationError::new("guess_length");
        err.message = Some(format!("Guess must be at most {MAX_GUESS_LENGTH} characters").into());
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_accepts_reasonable_input() {
        assert!(validate_display_name("alice").is_ok());
        assert!(validate_display_name("Team Rocket 🚀").is_ok());
    }

    #[test]
    fn display_name_rejects_blank() {
        assert!(validate_display_name("").is_err());
        assert!(validate_display_name("   ").is_err());
    }

    #[test]
    fn display_name_rejects_oversized() {
        let name = "x".repeat(MAX_DISPLAY_NAME_LENGTH + 1);
        assert!(validate_display_name(&name).is_err());
    }

    #[test]
    fn guess_rejects_blank_and_oversized() {
        assert!(validate_guess_text("deploy").is_ok());
        assert!(validate_guess_text(" ").is_err());
        assert!(validate_guess_text(&"y".repeat(MAX_GUESS_LENGTH + 1)).is_err());
    }
}
