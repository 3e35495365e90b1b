use crate::domain::model::{AnimeInfo, Character};
use crate::domain::ports::CharacterSource;
use crate::utils::error::{Result, VsError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_CHARACTER_LIMIT: usize = 30;

#[derive(Debug, Deserialize)]
struct JikanResponse {
    data: Vec<JikanEntry>,
}

#[derive(Debug, Deserialize)]
struct JikanEntry {
    character: Option<JikanCharacter>,
    role: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JikanCharacter {
    mal_id: Option<u64>,
    name: Option<String>,
    images: Option<JikanImages>,
}

#[derive(Debug, Deserialize)]
struct JikanImages {
    jpg: Option<JikanImage>,
}

#[derive(Debug, Deserialize)]
struct JikanImage {
    image_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct JikanOptions {
    /// Only keep entries whose role is "Main".
    pub main_only: bool,
    pub character_limit: usize,
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

impl Default for JikanOptions {
    fn default() -> Self {
        Self {
            main_only: false,
            character_limit: DEFAULT_CHARACTER_LIMIT,
            timeout: None,
            user_agent: None,
        }
    }
}

pub struct JikanClient {
    client: Client,
    options: JikanOptions,
}

impl JikanClient {
    pub fn new(options: JikanOptions) -> Result<Self> {
        let user_agent = options
            .user_agent
            .clone()
            .unwrap_or_else(|| format!("shounen-vs/{}", env!("CARGO_PKG_VERSION")));

        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            options,
        })
    }
}

#[async_trait]
impl CharacterSource for JikanClient {
    async fn fetch_characters(&self, anime: &AnimeInfo) -> Result<Vec<Character>> {
        tracing::debug!("Making API request to: {}", anime.api_url);
        let response = self.client.get(&anime.api_url).send().await?;

        let status = response.status();
        tracing::debug!("API response status for {}: {}", anime.name, status);

        if !status.is_success() {
            return Err(VsError::FetchError {
                anime: anime.name.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let characters = parse_characters(
            anime,
            &body,
            self.options.main_only,
            self.options.character_limit,
        )?;

        tracing::debug!("Loaded {} characters for {}", characters.len(), anime.name);
        Ok(characters)
    }
}

/// 將 Jikan 回應轉成角色列表：過濾無效紀錄、保留上游順序、最多 `limit` 筆
pub fn parse_characters(
    anime: &AnimeInfo,
    body: &str,
    main_only: bool,
    limit: usize,
) -> Result<Vec<Character>> {
    let response: JikanResponse =
        serde_json::from_str(body).map_err(|e| VsError::ParseError {
            anime: anime.name.clone(),
            message: e.to_string(),
        })?;

    let total = response.data.len();
    let characters: Vec<Character> = response
        .data
        .into_iter()
        .filter(|entry| !main_only || is_main_role(entry.role.as_deref()))
        .filter_map(|entry| into_character(entry, &anime.name))
        .take(limit)
        .collect();

    if characters.is_empty() {
        tracing::warn!("⚠️ No usable characters for {} ({} raw records)", anime.name, total);
        return Err(VsError::EmptyResultError {
            anime: anime.name.clone(),
        });
    }

    if characters.len() < total {
        tracing::debug!(
            "Kept {} of {} raw records for {}",
            characters.len(),
            total,
            anime.name
        );
    }

    Ok(characters)
}

fn is_main_role(role: Option<&str>) -> bool {
    role.is_some_and(|role| role.trim().eq_ignore_ascii_case("main"))
}

fn into_character(entry: JikanEntry, anime: &str) -> Option<Character> {
    let character = entry.character?;
    let id = character.mal_id?;
    let name = character.name?;
    let image_url = character.images?.jpg?.image_url?;

    // 不合格的紀錄直接略過，不視為錯誤
    Character::new(id, name, anime, image_url).ok()
}
