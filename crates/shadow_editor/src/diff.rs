//! Short descriptions of what an undo or redo changed

use shadow_model::ShadowDocument;

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Describe the change from `current` to `restored`, first match wins:
/// layer count, background color, background opacity, visibility, then the
/// first differing field of the first differing layer.
pub fn describe_change(current: &ShadowDocument, restored: &ShadowDocument) -> String {
    let (old, new) = (current.shadows.len(), restored.shadows.len());
    if old != new {
        let (verb, count) = if new > old {
            ("Added", new - old)
        } else {
            ("Removed", old - new)
        };
        return format!("{} {} shadow{}, {}→{} layers", verb, count, plural(count), old, new);
    }

    if current.background.color != restored.background.color {
        return format!(
            "Background color {} → {}",
            current.background.color, restored.background.color
        );
    }
    if current.background.opacity != restored.background.opacity {
        return format!(
            "Background opacity {}% → {}%",
            current.background.opacity, restored.background.opacity
        );
    }

    let (old_visible, new_visible) = (current.visible_count(), restored.visible_count());
    if old_visible != new_visible {
        return if new_visible > old_visible {
            "Showed shadow layer".to_string()
        } else {
            "Hidden shadow layer".to_string()
        };
    }

    for (index, (before, after)) in current.shadows.iter().zip(&restored.shadows).enumerate() {
        let layer = index + 1;
        if before.color != after.color {
            return format!("Layer {} color {} → {}", layer, before.color, after.color);
        }
        if before.blur != after.blur {
            return format!("Layer {} blur {}px → {}px", layer, before.blur, after.blur);
        }
        if before.spread != after.spread {
            return format!("Layer {} spread {}px → {}px", layer, before.spread, after.spread);
        }
        if before.opacity != after.opacity {
            return format!("Layer {} opacity {}% → {}%", layer, before.opacity, after.opacity);
        }
        if before.angle != after.angle || before.distance != after.distance {
            return format!(
                "Layer {} offset {}° {}px → {}° {}px",
                layer, before.angle, before.distance, after.angle, after.distance
            );
        }
    }

    "Changed shadow properties".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shadow_model::{Background, LayerTemplate};

    #[test]
    fn test_layer_count() {
        let one = ShadowDocument::default();
        let mut three = one.clone();
        three.push_template(LayerTemplate::default());
        three.push_template(LayerTemplate::default());

        assert_eq!(describe_change(&one, &three), "Added 2 shadows, 1→3 layers");
        assert_eq!(describe_change(&three, &one), "Removed 2 shadows, 3→1 layers");

        let empty = ShadowDocument::empty();
        assert_eq!(describe_change(&one, &empty), "Removed 1 shadow, 1→0 layers");
    }

    #[test]
    fn test_background_before_layers() {
        let current = ShadowDocument::default();
        let mut restored = current.clone();
        restored.background = Background::new("#112233", 50);
        restored.shadows[0].blur = 40;
        assert_eq!(describe_change(&current, &restored), "Background color #ffffff → #112233");

        restored.background.color = current.background.color.clone();
        assert_eq!(describe_change(&current, &restored), "Background opacity 100% → 50%");
    }

    #[test]
    fn test_visibility() {
        let current = ShadowDocument::default();
        let mut restored = current.clone();
        restored.shadows[0].visible = false;
        assert_eq!(describe_change(&current, &restored), "Hidden shadow layer");
        assert_eq!(describe_change(&restored, &current), "Showed shadow layer");
    }

    #[test]
    fn test_layer_fields() {
        let current = ShadowDocument::default();

        let mut restored = current.clone();
        restored.shadows[0].color = "#ff0000".to_string();
        restored.shadows[0].blur = 1;
        assert_eq!(describe_change(&current, &restored), "Layer 1 color #000000 → #ff0000");

        let mut restored = current.clone();
        restored.shadows[0].set_offset(180, 12);
        assert_eq!(describe_change(&current, &restored), "Layer 1 offset 90° 8px → 180° 12px");

        let mut restored = current.clone();
        restored.shadows[0].opacity = 55;
        assert_eq!(describe_change(&current, &restored), "Layer 1 opacity 20% → 55%");
    }

    #[test]
    fn test_fallback() {
        let current = ShadowDocument::default();
        let mut restored = current.clone();
        restored.next_id = 10;
        assert_eq!(describe_change(&current, &restored), "Changed shadow properties");
    }
}
