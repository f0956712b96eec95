// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Callsheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callsheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Outward-facing text surfaces: cell/header display formatting, the card
//! projection of raw records, and the requery serialization of the scorecard.

pub mod card;
pub mod cell;
pub mod requery;

pub use card::PositionCard;
pub use cell::{format_cell, format_date, format_json_cell, format_time, header_label};
pub use requery::serialize_for_requery;
