//! Media asset URL construction
//!
//! Pure functions mapping (cloud name, asset reference, kind, intent) to a
//! fetchable CDN delivery URL. No network calls; the CDN applies the
//! transform described in the URL path.

use crate::db::models::MediaKind;

/// Display intent, mapped to a fixed transform descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayIntent {
    /// 400x400 fill crop for grid tiles
    Thumbnail,
    /// Best-quality large rendition for the lightbox
    Fullscreen,
    /// 1920x1080 fill crop for the hero background
    Hero,
}

/// Transform options for the generic builder
#[derive(Debug, Clone, Default)]
pub struct TransformOptions {
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Crop mode, defaults to `fill`
    pub crop: Option<&'static str>,
    /// Escape hatch: a complete raw transform string overriding the rest
    pub raw_transform: Option<String>,
}

/// Build a delivery URL for an asset with explicit transform options.
///
/// Returns an empty string when the cloud name is unset (unconfigured
/// deployments render nothing rather than broken links).
pub fn asset_url(
    cloud_name: &str,
    asset_ref: &str,
    kind: MediaKind,
    options: &TransformOptions,
) -> String {
    if cloud_name.is_empty() {
        return String::new();
    }

    let resource_type = match kind {
        MediaKind::Video => "video",
        MediaKind::Image => "image",
    };
    let base = format!("https://res.cloudinary.com/{}/{}/upload", cloud_name, resource_type);

    if let Some(raw) = &options.raw_transform {
        return format!("{}/{}/{}", base, raw, asset_ref);
    }

    let mut transforms = vec!["f_auto".to_string(), "q_auto".to_string()];
    if kind == MediaKind::Image {
        if let Some(w) = options.width {
            transforms.push(format!("w_{}", w));
        }
        if let Some(h) = options.height {
            transforms.push(format!("h_{}", h));
        }
        transforms.push(format!("c_{}", options.crop.unwrap_or("fill")));
    }
    // Video keeps the minimal transform for playback

    format!("{}/{}/{}", base, transforms.join(","), asset_ref)
}

/// Build a delivery URL for one of the fixed display intents
pub fn url_for_intent(
    cloud_name: &str,
    asset_ref: &str,
    kind: MediaKind,
    intent: DisplayIntent,
) -> String {
    let options = match intent {
        DisplayIntent::Thumbnail => TransformOptions {
            width: Some(400),
            height: Some(400),
            crop: Some("fill"),
            raw_transform: None,
        },
        DisplayIntent::Fullscreen => TransformOptions {
            raw_transform: Some(
                if kind == MediaKind::Image {
                    "f_auto,q_auto:best,w_1920".to_string()
                } else {
                    "f_auto,q_auto".to_string()
                },
            ),
            ..Default::default()
        },
        DisplayIntent::Hero => TransformOptions {
            raw_transform: Some("f_auto,q_auto:good,w_1920,h_1080,c_fill".to_string()),
            ..Default::default()
        },
    };
    asset_url(cloud_name, asset_ref, kind, &options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thumbnail_url() {
        let url = url_for_intent("demo", "mariage/photo1", MediaKind::Image, DisplayIntent::Thumbnail);
        assert_eq!(
            url,
            "https://res.cloudinary.com/demo/image/upload/f_auto,q_auto,w_400,h_400,c_fill/mariage/photo1"
        );
    }

    #[test]
    fn test_fullscreen_image_and_video() {
        let image = url_for_intent("demo", "mariage/photo1", MediaKind::Image, DisplayIntent::Fullscreen);
        assert_eq!(
            image,
            "https://res.cloudinary.com/demo/image/upload/f_auto,q_auto:best,w_1920/mariage/photo1"
        );
        let video = url_for_intent("demo", "soiree/danse", MediaKind::Video, DisplayIntent::Fullscreen);
        assert_eq!(
            video,
            "https://res.cloudinary.com/demo/video/upload/f_auto,q_auto/soiree/danse"
        );
    }

    #[test]
    fn test_hero_url() {
        let url = url_for_intent("demo", "mariage/couverture", MediaKind::Image, DisplayIntent::Hero);
        assert_eq!(
            url,
            "https://res.cloudinary.com/demo/image/upload/f_auto,q_auto:good,w_1920,h_1080,c_fill/mariage/couverture"
        );
    }

    #[test]
    fn test_video_ignores_dimension_options() {
        let options = TransformOptions {
            width: Some(400),
            height: Some(400),
            crop: Some("fill"),
            raw_transform: None,
        };
        let url = asset_url("demo", "soiree/danse", MediaKind::Video, &options);
        assert_eq!(url, "https://res.cloudinary.com/demo/video/upload/f_auto,q_auto/soiree/danse");
    }

    #[test]
    fn test_missing_cloud_name_yields_empty() {
        assert_eq!(
            url_for_intent("", "mariage/photo1", MediaKind::Image, DisplayIntent::Thumbnail),
            ""
        );
    }
}
