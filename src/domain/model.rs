use crate::utils::error::{Result, VsError};
use crate::utils::validation::is_http_url;
use serde::{Deserialize, Serialize};

/// A character eligible for a matchup. Fields are only readable after
/// construction; `Character::new` enforces the name and image rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Character {
    id: u64,
    name: String,
    anime: String,
    image_url: String,
}

impl Character {
    pub fn new(
        id: u64,
        name: impl Into<String>,
        anime: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        let image_url = image_url.into();

        if name.trim().is_empty() {
            return Err(VsError::InvalidCharacter {
                field: "name".to_string(),
                reason: "name is empty".to_string(),
            });
        }
        if !is_http_url(&image_url) {
            return Err(VsError::InvalidCharacter {
                field: "image_url".to_string(),
                reason: format!("not an http(s) URL: {:?}", image_url),
            });
        }

        Ok(Self {
            id,
            name,
            anime: anime.into(),
            image_url,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn anime(&self) -> &str {
        &self.anime
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimeInfo {
    pub id: u32,
    pub name: String,
    pub api_url: String,
}

impl AnimeInfo {
    pub fn new(id: u32, name: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            api_url: api_url.into(),
        }
    }

    /// Character listing endpoint for a title on the public Jikan v4 API.
    pub fn jikan(id: u32, name: impl Into<String>) -> Self {
        Self::new(
            id,
            name,
            format!("https://api.jikan.moe/v4/anime/{}/characters", id),
        )
    }
}

/// The built-in three-title catalog.
pub fn default_catalog() -> Vec<AnimeInfo> {
    vec![
        AnimeInfo::jikan(21, "One Piece"),
        AnimeInfo::jikan(20, "Naruto"),
        AnimeInfo::jikan(269, "Bleach"),
    ]
}

/// Two characters with different identifiers, presented for a single vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Matchup {
    pub left: Character,
    pub right: Character,
}

impl Matchup {
    pub fn ids(&self) -> (u64, u64) {
        (self.left.id(), self.right.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStatus {
    pub entries: Vec<u64>,
    pub size: usize,
    pub capacity: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_new_accepts_valid_record() {
        let luffy = Character::new(
            40,
            "Monkey D., Luffy",
            "One Piece",
            "https://cdn.myanimelist.net/images/characters/9/310307.jpg",
        )
        .unwrap();

        assert_eq!(luffy.id(), 40);
        assert_eq!(luffy.name(), "Monkey D., Luffy");
        assert_eq!(luffy.anime(), "One Piece");
    }

    #[test]
    fn test_character_new_rejects_blank_name() {
        let err = Character::new(1, "   ", "Naruto", "https://example.com/a.jpg").unwrap_err();
        assert!(matches!(err, VsError::InvalidCharacter { ref field, .. } if field == "name"));
    }

    #[test]
    fn test_character_new_rejects_non_http_image() {
        let err = Character::new(1, "Ichigo", "Bleach", "/placeholder.svg").unwrap_err();
        assert!(matches!(err, VsError::InvalidCharacter { ref field, .. } if field == "image_url"));
    }

    #[test]
    fn test_character_new_requires_literal_http_prefix() {
        for raw in [
            "  https://cdn.example.com/a.jpg",
            "ht\ntps://cdn.example.com/a.jpg",
            "http:cdn.example.com/a.jpg",
        ] {
            assert!(Character::new(1, "Luffy", "One Piece", raw).is_err(), "{:?}", raw);
        }

        let ok = Character::new(1, "Luffy", "One Piece", "https://cdn.example.com/a.jpg").unwrap();
        assert!(ok.image_url().starts_with("https://"));
    }

    #[test]
    fn test_default_catalog_has_three_distinct_titles() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog[0].api_url, "https://api.jikan.moe/v4/anime/21/characters");
        assert_eq!(catalog[2].name, "Bleach");
    }
}
