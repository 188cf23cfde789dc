use actix_web::client;
use actix_web::client::ClientRequest;
use futures::future::err as fut_err;
use futures::Future;
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

use crate::app::provider::utils;

pub use self::filter::{AttachedFilter, CascadingTeamFilter, FilterOutcome, FilterResponse, FilterState};

pub mod filter;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamOption {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
}

impl TeamOption {
    pub fn new(id: &str, name: &str) -> Self {
        TeamOption {
            id: id.to_owned(),
            name: name.to_owned(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

// primary keys come back as numbers, option values are strings
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
    where D: Deserializer<'de>
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(id) => id.to_string(),
        RawId::Text(id) => id,
    })
}

pub fn dedup_teams(teams: Vec<TeamOption>) -> Vec<TeamOption> {
    let mut seen = HashSet::new();

    teams
        .into_iter()
        .filter(|team| {
            let fresh = seen.insert(team.id.clone());
            if !fresh {
                warn!("Duplicate team id {} in lookup response", team.id);
            }
            fresh
        })
        .collect()
}

#[derive(Debug, Fail)]
pub enum LookupError {
    #[fail(display = "Failed to load teams for week {}: {}", week_id, reason)]
    RequestError {
        week_id: String,
        reason: String,
    },
}

pub type TeamsFuture = dyn Future<Item=Vec<TeamOption>, Error=LookupError>;

pub trait TeamLookup {
    fn teams_for_week(&self, week_id: &str) -> Box<TeamsFuture>;
}

#[derive(Debug, Deserialize)]
struct TeamsResponse {
    teams: Vec<TeamOption>,
}

/// Asks the admin backend: `GET <endpoint>?week_id=<id>` answering `{"teams": [{"id", "name"}, ..]}`.
pub struct HttpTeamLookup {
    endpoint: Url,
    timeout: Duration,
}

impl HttpTeamLookup {
    pub const RELATIVE_PATH: &'static str = "../filter-teams-by-week/";

    pub fn new(endpoint: Url, timeout: Duration) -> Self {
        HttpTeamLookup { endpoint, timeout }
    }

    pub fn for_page(page_url: &str, timeout: Duration) -> Result<Self, url::ParseError> {
        let endpoint = Url::parse(page_url)?.join(Self::RELATIVE_PATH)?;

        Ok(Self::new(endpoint, timeout))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn build_request(&self, week_id: &str) -> Result<ClientRequest, String> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().clear().append_pair("week_id", week_id);

        client::get(url.as_str())
            .header("Accept", "application/json")
            .finish()
            .map_err(|e| e.to_string())
    }
}

impl TeamLookup for HttpTeamLookup {
    fn teams_for_week(&self, week_id: &str) -> Box<TeamsFuture> {
        let request = match self.build_request(week_id) {
            Ok(req) => req,
            Err(reason) => return Box::new(fut_err(LookupError::RequestError {
                week_id: week_id.to_owned(),
                reason,
            })),
        };

        let week_id = week_id.to_owned();
        Box::new(
            utils::fetch_json_request::<TeamsResponse>(request, self.timeout)
                .map(|res| res.teams)
                .map_err(move |e| LookupError::RequestError {
                    week_id,
                    reason: e.to_string(),
                })
        )
    }
}
