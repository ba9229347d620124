use crate::city::City;
use crate::controller::RequestState;
use crate::error::AppError;
use crate::weather::WeatherReading;

/// Background category derived from a weather description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Sunny,
    Cloudy,
    Rain,
    Snow,
    Thunderstorm,
    Fog,
    Neutral,
}

// Checked in order; first hit wins.
const KEYWORDS: [(Category, &[&str]); 6] = [
    (Category::Sunny, &["sunny", "clear"]),
    (Category::Cloudy, &["cloud"]),
    (Category::Rain, &["rain", "drizzle"]),
    (Category::Snow, &["snow"]),
    (Category::Thunderstorm, &["thunder"]),
    (Category::Fog, &["fog", "mist"]),
];

impl Category {
    pub fn classify(description: &str) -> Category {
        let desc = description.to_lowercase();
        KEYWORDS
            .iter()
            .find(|(_, words)| words.iter().any(|w| desc.contains(w)))
            .map(|(category, _)| *category)
            .unwrap_or(Category::Neutral)
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Category::Sunny => "background-sunny",
            Category::Cloudy => "background-cloudy",
            Category::Rain => "background-rain",
            Category::Snow => "background-snow",
            Category::Thunderstorm => "background-thunderstorm",
            Category::Fog => "background-fog",
            Category::Neutral => "",
        }
    }
}

/// Text contrast for the weather panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contrast {
    /// Light text over a darkened panel
    Light,
    Dark,
}

impl Contrast {
    pub fn for_category(category: Category) -> Contrast {
        match category {
            Category::Cloudy | Category::Rain | Category::Thunderstorm | Category::Fog => {
                Contrast::Light
            }
            Category::Sunny | Category::Snow | Category::Neutral => Contrast::Dark,
        }
    }

    pub fn text_color(self) -> &'static str {
        match self {
            Contrast::Light => "#fff",
            Contrast::Dark => "#333",
        }
    }

    pub fn panel_background(self) -> &'static str {
        match self {
            Contrast::Light => "rgba(0,0,0,0.3)",
            Contrast::Dark => "rgba(255,255,255,0.8)",
        }
    }

    pub fn panel_shadow(self) -> &'static str {
        match self {
            Contrast::Light => "0 4px 12px rgba(0,0,0,0.7)",
            Contrast::Dark => "0 4px 12px rgba(0,0,0,0.15)",
        }
    }
}

/// Icons not already on `http`/`https` are scheme-relative; pin them to https.
pub fn normalize_icon_url(icon: &str) -> String {
    if icon.starts_with("http") {
        icon.to_string()
    } else {
        format!("https:{icon}")
    }
}

/// Render the panel for the current state.
pub fn render(state: &RequestState) -> String {
    match state {
        RequestState::Idle => "Choose a city.".to_string(),
        RequestState::Loading { .. } => "Getting weather data...".to_string(),
        RequestState::Failed(message) => message.clone(),
        RequestState::Succeeded(reading) => render_reading(reading),
    }
}

/// One table row for the survey command.
pub fn summary_line(city: City, outcome: &Result<WeatherReading, AppError>) -> String {
    match outcome {
        Ok(reading) => format!(
            "{:<5} {:<12} {:>6.1} °C {:>5.0}%  {} ({:?})",
            city.region_id(),
            city.display_name(),
            reading.temperature,
            reading.humidity,
            reading.description,
            Category::classify(&reading.description)
        ),
        Err(e) => format!(
            "{:<5} {:<12} unavailable: {}",
            city.region_id(),
            city.display_name(),
            e
        ),
    }
}

fn render_reading(reading: &WeatherReading) -> String {
    let category = Category::classify(&reading.description);
    let contrast = Contrast::for_category(category);

    let class = match category.css_class() {
        "" => "default",
        class => class,
    };

    let mut lines = vec![
        format!(
            "[{} | text {} on {} | shadow {}]",
            class,
            contrast.text_color(),
            contrast.panel_background(),
            contrast.panel_shadow()
        ),
        format!("Weather in {}", reading.city),
        format!("Temperature: {} °C", reading.temperature),
        format!("Description: {}", reading.description),
        format!("Humidity: {}%", reading.humidity),
    ];
    if let Some(icon) = reading.icon.as_deref().filter(|i| !i.is_empty()) {
        lines.push(format!("Icon: {}", normalize_icon_url(icon)));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_rows() {
        let reading = WeatherReading {
            city: "Tirane".to_string(),
            temperature: 21.0,
            description: "Clear sky".to_string(),
            humidity: 40.0,
            icon: None,
        };
        assert_eq!(
            summary_line(City::Tirane, &Ok(reading)),
            "AL11  Tirane         21.0 °C    40%  Clear sky (Sunny)"
        );
        let failed = summary_line(
            City::Vlore,
            &Err(AppError::from_status(reqwest::StatusCode::BAD_GATEWAY)),
        );
        assert_eq!(failed, "AL12  Vlore        unavailable: Error 502: Bad Gateway");
    }

    #[test]
    fn heavy_rain_is_rain_with_light_text() {
        let category = Category::classify("Heavy Rain showers");
        assert_eq!(category, Category::Rain);
        assert_eq!(Contrast::for_category(category), Contrast::Light);
    }

    #[test]
    fn first_keyword_group_wins() {
        // "Partly cloudy" style descriptions with several keywords
        assert_eq!(Category::classify("Clear with some clouds"), Category::Sunny);
        assert_eq!(Category::classify("Thundery outbreaks with rain"), Category::Rain);
        assert_eq!(Category::classify("Patchy light drizzle"), Category::Rain);
        assert_eq!(Category::classify("Moderate or heavy SNOW"), Category::Snow);
        assert_eq!(Category::classify("Thunder"), Category::Thunderstorm);
        assert_eq!(Category::classify("Freezing fog"), Category::Fog);
        assert_eq!(Category::classify("Mist"), Category::Fog);
        assert_eq!(Category::classify("Overcast"), Category::Neutral);
        assert_eq!(Category::classify(""), Category::Neutral);
    }

    #[test]
    fn contrast_by_category() {
        assert_eq!(Contrast::for_category(Category::Sunny), Contrast::Dark);
        assert_eq!(Contrast::for_category(Category::Snow), Contrast::Dark);
        assert_eq!(Contrast::for_category(Category::Neutral), Contrast::Dark);
        assert_eq!(Contrast::for_category(Category::Fog), Contrast::Light);
        assert_eq!(Contrast::Light.text_color(), "#fff");
        assert_eq!(Contrast::Dark.text_color(), "#333");
        assert_eq!(Contrast::Light.panel_shadow(), "0 4px 12px rgba(0,0,0,0.7)");
        assert_eq!(Contrast::Dark.panel_shadow(), "0 4px 12px rgba(0,0,0,0.15)");
    }

    #[test]
    fn icon_urls_get_a_scheme() {
        assert_eq!(
            normalize_icon_url("//cdn.example.com/icon.png"),
            "https://cdn.example.com/icon.png"
        );
        assert_eq!(normalize_icon_url("https://x/y.png"), "https://x/y.png");
        assert_eq!(normalize_icon_url("http://x/y.png"), "http://x/y.png");
    }

    #[test]
    fn renders_each_state() {
        assert_eq!(render(&RequestState::Idle), "Choose a city.");
        assert_eq!(
            render(&RequestState::Loading { city: City::Korce }),
            "Getting weather data..."
        );
        assert_eq!(
            render(&RequestState::Failed("boom".to_string())),
            "boom"
        );
    }

    #[test]
    fn renders_reading_panel() {
        let reading = WeatherReading {
            city: "Shkoder".to_string(),
            temperature: 12.5,
            description: "Light rain".to_string(),
            humidity: 88.0,
            icon: Some("//cdn.example.com/rain.png".to_string()),
        };
        let panel = render(&RequestState::Succeeded(reading));
        assert_eq!(
            panel,
            "[background-rain | text #fff on rgba(0,0,0,0.3) | shadow 0 4px 12px rgba(0,0,0,0.7)]\n\
             Weather in Shkoder\n\
             Temperature: 12.5 °C\n\
             Description: Light rain\n\
             Humidity: 88%\n\
             Icon: https://cdn.example.com/rain.png"
        );
    }

    #[test]
    fn neutral_panel_has_no_icon_line() {
        let reading = WeatherReading {
            city: "Diber".to_string(),
            temperature: 3.0,
            description: "Overcast".to_string(),
            humidity: 75.0,
            icon: None,
        };
        let panel = render(&RequestState::Succeeded(reading));
        assert!(panel.starts_with("[default | text #333"));
        assert!(panel.ends_with("Humidity: 75%"));
    }
}
