//! Normalized gallery models built from TMDB responses.

use chrono::{Datelike, NaiveDate};

use super::genre::GenreTable;
use crate::tmdb::{
    TmdbCastMember, TmdbCredits, TmdbCrewMember, TmdbMovieDetails, TmdbMovieListItem,
};

/// A movie card in the gallery, with genre names resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieSummary {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Release date as sent by TMDB (YYYY-MM-DD, possibly empty).
    pub release_date: Option<String>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Overview text.
    pub overview: Option<String>,
    /// Vote average (0-10).
    pub vote_average: f64,
    /// Genre names in the order TMDB listed the ids.
    pub genre_names: Vec<String>,
}

impl MovieSummary {
    /// Builds a summary, resolving `genre_ids` through `genres`.
    #[must_use]
    pub fn from_list_item(item: TmdbMovieListItem, genres: &GenreTable) -> Self {
        let genre_names = genres.resolve(&item.genre_ids);
        Self {
            id: item.id,
            title: item.title,
            release_date: item.release_date,
            poster_path: item.poster_path,
            overview: item.overview,
            vote_average: item.vote_average,
            genre_names,
        }
    }

    /// Release year, if the date parses.
    #[must_use]
    pub fn release_year(&self) -> Option<i32> {
        release_year(self.release_date.as_deref())
    }
}

/// Full movie page: summary fields plus runtime and credits.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetail {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Release date.
    pub release_date: Option<String>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Overview text.
    pub overview: Option<String>,
    /// Vote average (0-10).
    pub vote_average: f64,
    /// Genre names taken from the genres embedded in the detail response.
    pub genre_names: Vec<String>,
    /// Runtime in minutes.
    pub runtime: Option<u32>,
    /// Tagline.
    pub tagline: Option<String>,
    /// Cast, in billing order.
    pub cast: Vec<CastMember>,
    /// Crew.
    pub crew: Vec<CrewMember>,
}

impl MovieDetail {
    /// Merges a detail response with its credits.
    #[must_use]
    pub fn from_parts(details: TmdbMovieDetails, credits: TmdbCredits) -> Self {
        let genre_names = details.genres.into_iter().map(|genre| genre.name).collect();
        let mut cast: Vec<CastMember> = credits.cast.into_iter().map(CastMember::from).collect();
        cast.sort_by_key(|member| member.order);
        Self {
            id: details.id,
            title: details.title,
            release_date: details.release_date,
            poster_path: details.poster_path,
            overview: details.overview,
            vote_average: details.vote_average,
            genre_names,
            runtime: details.runtime,
            tagline: details.tagline,
            cast,
            crew: credits.crew.into_iter().map(CrewMember::from).collect(),
        }
    }

    /// Release year, if the date parses.
    #[must_use]
    pub fn release_year(&self) -> Option<i32> {
        release_year(self.release_date.as_deref())
    }

    /// Names of crew members credited with `job` (e.g., "Director").
    #[must_use]
    pub fn crew_with_job(&self, job: &str) -> Vec<&str> {
        self.crew
            .iter()
            .filter(|member| member.job == job)
            .map(|member| member.name.as_str())
            .collect()
    }
}

/// A cast credit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastMember {
    /// TMDB person ID.
    pub id: u64,
    /// Person name.
    pub name: String,
    /// Character played.
    pub character: String,
    /// Billing order.
    pub order: u32,
}

impl From<TmdbCastMember> for CastMember {
    fn from(member: TmdbCastMember) -> Self {
        Self {
            id: member.id,
            name: member.name,
            character: member.character,
            order: member.order,
        }
    }
}

/// A crew credit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrewMember {
    /// TMDB person ID.
    pub id: u64,
    /// Person name.
    pub name: String,
    /// Job title.
    pub job: String,
    /// Department.
    pub department: String,
}

impl From<TmdbCrewMember> for CrewMember {
    fn from(member: TmdbCrewMember) -> Self {
        Self {
            id: member.id,
            name: member.name,
            job: member.job,
            department: member.department,
        }
    }
}

/// One page of gallery results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    /// Movies on this page.
    pub items: Vec<MovieSummary>,
    /// Total matches across all pages.
    pub total_results: u32,
    /// Page count derived from `total_results`.
    pub total_pages: u32,
}

impl QueryResult {
    /// Whether the query matched nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_results == 0
    }
}

fn release_year(date: Option<&str>) -> Option<i32> {
    let date = date?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .map(|parsed| parsed.year())
}
