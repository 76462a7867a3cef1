//! Packing layouts for drawing hyperedges.
//!
//! Both layouts share one greedy first-fit packer ([`first_fit`]) over the
//! closed rank intervals of hyperedges under a [`NodeRanking`]:
//! - [`paoh_columns`] packs every hyperedge into vertical columns
//! - [`radial_sectors`] draws pairs as chords and packs larger hyperedges
//!   into concentric sectors

pub mod packing;
pub mod paoh;
pub mod radial;
pub mod ranking;

pub use packing::{first_fit, first_fit_by, Interval};
pub use paoh::{paoh_columns, PaohLayout, PlacedEdge};
pub use radial::{node_angle, radial_sectors, RadialLayout, Sector, SectorArc};
pub use ranking::NodeRanking;
