// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Callsheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callsheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Sessions contain the shape-varying payloads returned by the services and
//! the reconciled, editable scorecard derived from them.

pub(crate) mod fixtures;
pub mod payload;
pub mod record;
pub mod session;
pub mod value;

pub use payload::{service_error, RawRecord, RawResponse};
pub use record::{ColumnSet, Row, Scorecard};
pub use session::{Session, ViewMode};
pub use value::{CellValue, FieldKind, FieldValue};
