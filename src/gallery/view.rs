// SPDX-License-Identifier: GPL-3.0-only

//! Gallery projection
//!
//! Turns the stored records into display items. Items carry the actions
//! their buttons emit instead of callbacks; the presentation layer sends
//! them back as [`crate::app::Message::Gallery`].

use super::PhotoRecord;
use crate::constants::labels;

/// Per-item action, keyed by record id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryAction {
    Download(u64),
    Delete(u64),
}

/// One entry of the rendered gallery
#[derive(Debug, Clone, PartialEq)]
pub enum GalleryItem<'a> {
    /// Shown alone when the gallery is empty
    Placeholder { message: &'static str },
    Photo {
        id: u64,
        /// Encoded payload, usable directly as an image source
        thumbnail: &'a str,
        timestamp: &'a str,
        download: GalleryAction,
        delete: GalleryAction,
    },
}

impl GalleryItem<'_> {
    pub fn id(&self) -> Option<u64> {
        match self {
            GalleryItem::Placeholder { .. } => None,
            GalleryItem::Photo { id, .. } => Some(*id),
        }
    }
}

/// Project records into display items, in gallery order
pub fn render(records: &[PhotoRecord]) -> Vec<GalleryItem<'_>> {
    if records.is_empty() {
        return vec![GalleryItem::Placeholder {
            message: labels::EMPTY_GALLERY,
        }];
    }

    records
        .iter()
        .map(|record| GalleryItem::Photo {
            id: record.id,
            thumbnail: &record.data,
            timestamp: &record.timestamp,
            download: GalleryAction::Download(record.id),
            delete: GalleryAction::Delete(record.id),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64) -> PhotoRecord {
        PhotoRecord {
            id,
            data: format!("data:image/webp;base64,{}", id),
            timestamp: "2026-10-16T09:30:00.000Z".to_string(),
        }
    }

    #[test]
    fn test_empty_gallery_renders_placeholder() {
        let items = render(&[]);
        assert_eq!(items.len(), 1);
        assert!(matches!(items[0], GalleryItem::Placeholder { .. }));
        assert_eq!(items[0].id(), None);
    }

    #[test]
    fn test_items_follow_gallery_order_and_carry_ids() {
        let records = vec![record(3), record(1), record(2)];
        let items = render(&records);

        let ids: Vec<u64> = items.iter().filter_map(GalleryItem::id).collect();
        assert_eq!(ids, vec![3, 1, 2]);

        match &items[1] {
            GalleryItem::Photo {
                thumbnail,
                download,
                delete,
                ..
            } => {
                assert_eq!(*thumbnail, "data:image/webp;base64,1");
                assert_eq!(*download, GalleryAction::Download(1));
                assert_eq!(*delete, GalleryAction::Delete(1));
            }
            other => panic!("unexpected item {:?}", other),
        }
    }
}
