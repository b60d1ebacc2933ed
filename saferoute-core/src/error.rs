use thiserror::Error;

/// Failure of a single weather lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    /// The weather service answered, but rejected the place name.
    #[error("Place '{place}' was not found: {message}")]
    PlaceNotFound { place: String, message: String },

    /// Network failure, timeout, non-success status or malformed body.
    #[error("Failed to fetch weather for '{place}': {message}")]
    Transport { place: String, message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

impl WeatherError {
    pub fn place_not_found(place: &str, message: impl Into<String>) -> Self {
        Self::PlaceNotFound { place: place.to_owned(), message: message.into() }
    }

    pub fn transport(place: &str, message: impl Into<String>) -> Self {
        Self::Transport { place: place.to_owned(), message: message.into() }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput { message: message.into() }
    }

    /// Short message suitable for showing to an end user.
    pub fn user_message(&self) -> &str {
        match self {
            WeatherError::PlaceNotFound { .. } => "Invalid city name. Please try again.",
            WeatherError::Transport { .. } => {
                "Failed to fetch weather data. Please try again later."
            }
            WeatherError::InvalidInput { message } => message.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_place_and_reason() {
        let err = WeatherError::place_not_found("Atlantis", "No matching location found.");
        let msg = err.to_string();

        assert!(msg.contains("Atlantis"));
        assert!(msg.contains("No matching location found."));
    }

    #[test]
    fn user_message_depends_on_kind() {
        assert_eq!(
            WeatherError::transport("Manila", "timed out").user_message(),
            "Failed to fetch weather data. Please try again later."
        );
        assert_eq!(
            WeatherError::place_not_found("x", "nope").user_message(),
            "Invalid city name. Please try again."
        );
        assert_eq!(
            WeatherError::invalid_input("Please enter a city name.").user_message(),
            "Please enter a city name."
        );
    }
}
