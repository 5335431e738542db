// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Channel identifiers and channel sets.

use core::fmt;

/// A named stream of events from a single source.
///
/// The set is closed: every channel a widget can publish or consume is
/// listed here, so receivers match on it exhaustively instead of comparing
/// strings. [`Channel::name`] gives the wire name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    /// Step the map in a compass direction.
    Pan,
    /// New zoom level.
    Zoom,
    /// World window shown after a viewport change.
    VisibleWindow,
    /// Set or toggle a layer's opacity.
    ManageLayers,
    /// Search request carrying its own mode.
    Search,
    /// Show only matching groups.
    Filter,
    /// Highlight matching groups.
    Highlight,
    /// Show or hide labels.
    ShowLabels,
    /// A clicked element's id value.
    SelectId,
    /// A clicked element's category value.
    SelectCategory,
    /// A clicked group label.
    Select,
}

impl Channel {
    /// Every channel, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Pan,
        Self::Zoom,
        Self::VisibleWindow,
        Self::ManageLayers,
        Self::Search,
        Self::Filter,
        Self::Highlight,
        Self::ShowLabels,
        Self::SelectId,
        Self::SelectCategory,
        Self::Select,
    ];

    /// Returns the wire name of the channel.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pan => "pan",
            Self::Zoom => "zoom",
            Self::VisibleWindow => "visible_window",
            Self::ManageLayers => "manage_layers",
            Self::Search => "search",
            Self::Filter => "filter",
            Self::Highlight => "highlight",
            Self::ShowLabels => "show_labels",
            Self::SelectId => "select_id",
            Self::SelectCategory => "select_category",
            Self::Select => "select",
        }
    }

    /// Looks a channel up by its wire name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Returns the single-channel set for this channel.
    #[must_use]
    pub const fn into_set(self) -> ChannelSet {
        match self {
            Self::Pan => ChannelSet::PAN,
            Self::Zoom => ChannelSet::ZOOM,
            Self::VisibleWindow => ChannelSet::VISIBLE_WINDOW,
            Self::ManageLayers => ChannelSet::MANAGE_LAYERS,
            Self::Search => ChannelSet::SEARCH,
            Self::Filter => ChannelSet::FILTER,
            Self::Highlight => ChannelSet::HIGHLIGHT,
            Self::ShowLabels => ChannelSet::SHOW_LABELS,
            Self::SelectId => ChannelSet::SELECT_ID,
            Self::SelectCategory => ChannelSet::SELECT_CATEGORY,
            Self::Select => ChannelSet::SELECT,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags::bitflags! {
    /// The set of channels a receiver handles.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ChannelSet: u16 {
        /// [`Channel::Pan`].
        const PAN             = 1 << 0;
        /// [`Channel::Zoom`].
        const ZOOM            = 1 << 1;
        /// [`Channel::VisibleWindow`].
        const VISIBLE_WINDOW  = 1 << 2;
        /// [`Channel::ManageLayers`].
        const MANAGE_LAYERS   = 1 << 3;
        /// [`Channel::Search`].
        const SEARCH          = 1 << 4;
        /// [`Channel::Filter`].
        const FILTER          = 1 << 5;
        /// [`Channel::Highlight`].
        const HIGHLIGHT       = 1 << 6;
        /// [`Channel::ShowLabels`].
        const SHOW_LABELS     = 1 << 7;
        /// [`Channel::SelectId`].
        const SELECT_ID       = 1 << 8;
        /// [`Channel::SelectCategory`].
        const SELECT_CATEGORY = 1 << 9;
        /// [`Channel::Select`].
        const SELECT          = 1 << 10;
    }
}

impl ChannelSet {
    /// Returns `true` if `channel` is in the set.
    #[must_use]
    pub const fn accepts(self, channel: Channel) -> bool {
        self.contains(channel.into_set())
    }
}

impl From<Channel> for ChannelSet {
    fn from(channel: Channel) -> Self {
        channel.into_set()
    }
}
