//! Anniversary Assets - Maintenance of the content asset tree
//!
//! Every timeline entry owns a directory of images under the asset root. The
//! page expects those images to be named `thumbnail.<ext>` (one image) or
//! `thumbnail-<i>.<ext>` (several), in name order.

pub mod thumbnails;

pub use thumbnails::*;
