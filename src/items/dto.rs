use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::items::repo_types::Weather;
use crate::validation::{is_valid_name, is_valid_url};

/// Request body for POST /items. The owner is never taken from the body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub name: Option<String>,
    pub weather: Option<String>,
    pub image_url: Option<String>,
}

/// Validated item payload.
#[derive(Debug)]
pub struct NewItem {
    pub name: String,
    pub weather: Weather,
    pub image_url: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl CreateItemRequest {
    pub fn validate(self) -> Result<NewItem, ApiError> {
        let name = match self.name {
            Some(n) if !n.is_empty() => n,
            _ => return Err(ApiError::BadRequest("Item name is required.")),
        };
        if name.chars().count() < 2 {
            return Err(ApiError::BadRequest(
                "Item name must be at least 2 characters long.",
            ));
        }
        if !is_valid_name(&name) {
            return Err(ApiError::BadRequest(
                "Item name must not exceed 30 characters.",
            ));
        }

        let weather = match self.weather {
            Some(w) if !w.is_empty() => Weather::parse(&w)
                .ok_or(ApiError::BadRequest("Weather must be one of hot, warm, or cold."))?,
            _ => return Err(ApiError::BadRequest("Weather type is required.")),
        };

        let image_url = match self.image_url {
            Some(u) if u.is_empty() => {
                return Err(ApiError::BadRequest(
                    "The \"imageUrl\" field must be filled in.",
                ))
            }
            Some(u) if !is_valid_url(&u) => {
                return Err(ApiError::BadRequest(
                    "The \"imageUrl\" field must be a valid URL.",
                ))
            }
            Some(u) => u,
            None => {
                return Err(ApiError::BadRequest(
                    "The \"imageUrl\" field must be filled in.",
                ))
            }
        };

        Ok(NewItem {
            name,
            weather,
            image_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> CreateItemRequest {
        CreateItemRequest {
            name: Some("Wool scarf".into()),
            weather: Some("cold".into()),
            image_url: Some("https://x.com/scarf.png".into()),
        }
    }

    fn message(err: ApiError) -> &'static str {
        match err {
            ApiError::BadRequest(msg) => msg,
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }

    #[test]
    fn valid_item_passes() {
        let item = full_request().validate().expect("valid payload");
        assert_eq!(item.name, "Wool scarf");
        assert_eq!(item.weather, Weather::Cold);
    }

    #[test]
    fn name_is_required_and_bounded() {
        let mut req = full_request();
        req.name = None;
        assert_eq!(message(req.validate().unwrap_err()), "Item name is required.");

        let mut req = full_request();
        req.name = Some("x".into());
        assert_eq!(
            message(req.validate().unwrap_err()),
            "Item name must be at least 2 characters long."
        );

        let mut req = full_request();
        req.name = Some("x".repeat(31));
        assert_eq!(
            message(req.validate().unwrap_err()),
            "Item name must not exceed 30 characters."
        );
    }

    #[test]
    fn weather_must_be_a_known_value() {
        let mut req = full_request();
        req.weather = None;
        assert_eq!(message(req.validate().unwrap_err()), "Weather type is required.");

        let mut req = full_request();
        req.weather = Some("rainy".into());
        assert_eq!(
            message(req.validate().unwrap_err()),
            "Weather must be one of hot, warm, or cold."
        );
    }

    #[test]
    fn image_url_must_be_a_valid_url() {
        let mut req = full_request();
        req.image_url = None;
        assert_eq!(
            message(req.validate().unwrap_err()),
            "The \"imageUrl\" field must be filled in."
        );

        let mut req = full_request();
        req.image_url = Some("not-a-url".into());
        assert_eq!(
            message(req.validate().unwrap_err()),
            "The \"imageUrl\" field must be a valid URL."
        );
    }

    #[test]
    fn camel_case_field_names_deserialize() {
        let req: CreateItemRequest = serde_json::from_str(
            r#"{"name":"Cap","weather":"hot","imageUrl":"https://x.com/cap.png"}"#,
        )
        .unwrap();
        let item = req.validate().expect("valid payload");
        assert_eq!(item.image_url, "https://x.com/cap.png");
    }
}
