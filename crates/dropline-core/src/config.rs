//! Candidate model and dropdown configuration.
//!
//! Every optional or defaulted field is resolved exactly once, at
//! `DropdownConfig::resolve` / `Candidate::resolve` time, so the controller
//! and the presentation layer only ever see fully populated records. No
//! fallback logic lives anywhere else.

use thiserror::Error;
use web_time::Duration;

use crate::color::Color;
use crate::geometry::ListPosition;

/// One selectable option: a stored value plus an optional display label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub value: String,
    pub label: Option<String>,
}

impl Candidate {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: None,
        }
    }

    pub fn labeled(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: Some(label.into()),
        }
    }

    /// Label falls back to the value.
    pub fn resolve(self) -> ResolvedCandidate {
        let label = self.label.unwrap_or_else(|| self.value.clone());
        ResolvedCandidate {
            value: self.value,
            label,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedCandidate {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("item_count must be at least 1")]
    ZeroItemCount,
    #[error("font_size must be positive (got {0})")]
    NonPositiveFontSize(f32),
    #[error("item_padding must not be negative (got {0})")]
    NegativeItemPadding(f32),
    #[error("label_height must not be negative (got {0})")]
    NegativeLabelHeight(f32),
}

#[derive(Clone, Debug, PartialEq)]
pub struct DropdownConfig {
    /// Suppresses opening entirely.
    pub disabled: bool,
    /// Maximum rows visible at once.
    pub item_count: usize,
    /// Vertical padding inside a row.
    pub item_padding: f32,
    pub font_size: f32,
    /// Height of the floating label band above the field.
    pub label_height: f32,
    /// Governs the open/close fades and both timing gates.
    pub animation_duration: Duration,
    pub position: ListPosition,
    /// Show a host-supplied loading indicator over the overlay while open.
    pub show_spinner: bool,

    pub text_color: Color,
    pub item_color: Color,
    /// Colour of the selected row; falls back to `text_color`.
    pub selected_item_color: Option<Color>,
    pub base_color: Color,
}

impl Default for DropdownConfig {
    fn default() -> Self {
        Self {
            disabled: false,
            item_count: 4,
            item_padding: 8.0,
            font_size: 16.0,
            label_height: 32.0,
            animation_duration: Duration::from_millis(225),
            position: ListPosition::default(),
            show_spinner: false,
            text_color: Color::TEXT,
            item_color: Color::ITEM,
            selected_item_color: None,
            base_color: Color::BASE,
        }
    }
}

impl DropdownConfig {
    pub fn resolve(self) -> Result<ResolvedConfig, ConfigError> {
        if self.item_count == 0 {
            return Err(ConfigError::ZeroItemCount);
        }
        if self.font_size <= 0.0 {
            return Err(ConfigError::NonPositiveFontSize(self.font_size));
        }
        if self.item_padding < 0.0 {
            return Err(ConfigError::NegativeItemPadding(self.item_padding));
        }
        if self.label_height < 0.0 {
            return Err(ConfigError::NegativeLabelHeight(self.label_height));
        }

        Ok(ResolvedConfig {
            disabled: self.disabled,
            item_count: self.item_count,
            item_padding: self.item_padding,
            font_size: self.font_size,
            label_height: self.label_height,
            animation_duration: self.animation_duration,
            position: self.position,
            show_spinner: self.show_spinner,
            text_color: self.text_color,
            item_color: self.item_color,
            selected_item_color: self.selected_item_color.unwrap_or(self.text_color),
            base_color: self.base_color,
        })
    }
}

/// `DropdownConfig` with every fallback applied.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedConfig {
    pub disabled: bool,
    pub item_count: usize,
    pub item_padding: f32,
    pub font_size: f32,
    pub label_height: f32,
    pub animation_duration: Duration,
    pub position: ListPosition,
    pub show_spinner: bool,
    pub text_color: Color,
    pub item_color: Color,
    pub selected_item_color: Color,
    pub base_color: Color,
}

impl ResolvedConfig {
    /// Height of a single row under this configuration.
    pub fn item_size(&self) -> f32 {
        crate::geometry::item_size(self.font_size, self.item_padding)
    }
}
