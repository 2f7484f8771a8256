// SPDX-License-Identifier: GPL-3.0-or-later

//! Read-only views over fanart.tv responses.
//!
//! A view wraps the [`Document`] it was built from and checks each field only
//! when its getter runs. Identifier-like fields (`id`, `likes`, `disc`,
//! `tmdb_id`) are served as strings by fanart.tv and are returned as
//! strings.

use serde::{Deserialize, Serialize};

use crate::document::{as_array, as_object, as_string, Document, FieldError};

/// A single artwork image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Image(Document);

impl Image {
    pub fn id(&self) -> Result<String, FieldError> {
        self.0.field("id", as_string())
    }

    pub fn url(&self) -> Result<String, FieldError> {
        self.0.field("url", as_string())
    }

    /// Language code, `"00"` for language-neutral artwork.
    pub fn lang(&self) -> Result<String, FieldError> {
        self.0.field("lang", as_string())
    }

    pub fn likes(&self) -> Result<String, FieldError> {
        self.0.field("likes", as_string())
    }

    /// Disc number; only present on disc artwork.
    pub fn disc(&self) -> Result<String, FieldError> {
        self.0.field("disc", as_string())
    }

    /// Disc format (`bluray`, `dvd`, `3d`); only present on disc artwork.
    pub fn disc_type(&self) -> Result<String, FieldError> {
        self.0.field("disc_type", as_string())
    }

    pub fn document(&self) -> &Document {
        &self.0
    }
}

impl From<Document> for Image {
    fn from(document: Document) -> Self {
        Self(document)
    }
}

/// Movie artwork categories and the response fields that carry them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtworkKind {
    HdMovieLogo,
    MovieDisc,
    MovieLogo,
    MoviePoster,
    HdMovieClearArt,
    MovieArt,
    MovieBackground,
    MovieBanner,
    MovieThumb,
    MovieSquare,
}

impl ArtworkKind {
    pub const ALL: [ArtworkKind; 10] = [
        ArtworkKind::HdMovieLogo,
        ArtworkKind::MovieDisc,
        ArtworkKind::MovieLogo,
        ArtworkKind::MoviePoster,
        ArtworkKind::HdMovieClearArt,
        ArtworkKind::MovieArt,
        ArtworkKind::MovieBackground,
        ArtworkKind::MovieBanner,
        ArtworkKind::MovieThumb,
        ArtworkKind::MovieSquare,
    ];

    pub fn field_name(self) -> &'static str {
        match self {
            ArtworkKind::HdMovieLogo => "hdmovielogo",
            ArtworkKind::MovieDisc => "moviedisc",
            ArtworkKind::MovieLogo => "movielogo",
            ArtworkKind::MoviePoster => "movieposter",
            ArtworkKind::HdMovieClearArt => "hdmovieclearart",
            ArtworkKind::MovieArt => "movieart",
            ArtworkKind::MovieBackground => "moviebackground",
            ArtworkKind::MovieBanner => "moviebanner",
            ArtworkKind::MovieThumb => "moviethumb",
            ArtworkKind::MovieSquare => "moviesquare",
        }
    }
}

/// Artwork for one movie, as returned by `/v3/movies/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Movie(Document);

impl Movie {
    pub fn name(&self) -> Result<String, FieldError> {
        self.0.field("name", as_string())
    }

    pub fn tmdb_id(&self) -> Result<String, FieldError> {
        self.0.field("tmdb_id", as_string())
    }

    pub fn imdb_id(&self) -> Result<String, FieldError> {
        self.0.field("imdb_id", as_string())
    }

    /// Images of one category. fanart.tv omits empty categories, which
    /// surfaces here as [`FieldError::NotFound`].
    pub fn images(&self, kind: ArtworkKind) -> Result<Vec<Image>, FieldError> {
        self.0.field(kind.field_name(), as_array(as_object::<Image>()))
    }

    pub fn hd_movie_logo(&self) -> Result<Vec<Image>, FieldError> {
        self.images(ArtworkKind::HdMovieLogo)
    }

    pub fn movie_disc(&self) -> Result<Vec<Image>, FieldError> {
        self.images(ArtworkKind::MovieDisc)
    }

    pub fn movie_logo(&self) -> Result<Vec<Image>, FieldError> {
        self.images(ArtworkKind::MovieLogo)
    }

    pub fn movie_poster(&self) -> Result<Vec<Image>, FieldError> {
        self.images(ArtworkKind::MoviePoster)
    }

    pub fn hd_movie_clear_art(&self) -> Result<Vec<Image>, FieldError> {
        self.images(ArtworkKind::HdMovieClearArt)
    }

    pub fn movie_art(&self) -> Result<Vec<Image>, FieldError> {
        self.images(ArtworkKind::MovieArt)
    }

    pub fn movie_background(&self) -> Result<Vec<Image>, FieldError> {
        self.images(ArtworkKind::MovieBackground)
    }

    pub fn movie_banner(&self) -> Result<Vec<Image>, FieldError> {
        self.images(ArtworkKind::MovieBanner)
    }

    pub fn movie_thumb(&self) -> Result<Vec<Image>, FieldError> {
        self.images(ArtworkKind::MovieThumb)
    }

    pub fn movie_square(&self) -> Result<Vec<Image>, FieldError> {
        self.images(ArtworkKind::MovieSquare)
    }

    pub fn document(&self) -> &Document {
        &self.0
    }

    pub fn into_document(self) -> Document {
        self.0
    }
}

impl From<Document> for Movie {
    fn from(document: Document) -> Self {
        Self(document)
    }
}
