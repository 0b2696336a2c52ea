use glam::Vec2;
use crate::components::sprite::Sprite;
use crate::core::scene::Scene;
use crate::renderer::traits::Renderer;

/// Draw a scene: pen lines first, then visible sprites by layer.
pub fn draw_scene(scene: &Scene, renderer: &mut dyn Renderer) {
    for line in scene.pen_lines() {
        renderer.draw_line(line.from, line.to, &line.color, line.width);
    }
    for sprite in scene.draw_order() {
        draw_sprite(sprite, renderer);
    }
}

/// Draw one sprite. Loaded images win; otherwise a rotated polygon when
/// rotated drawing is on, or a plain filled rectangle.
pub fn draw_sprite(sprite: &Sprite, renderer: &mut dyn Renderer) {
    if !sprite.visible {
        return;
    }

    if let Some(handle) = sprite.image().and_then(|img| img.handle_for(sprite.size())) {
        renderer.draw_image(sprite.pos, sprite.size(), handle);
    } else if sprite.rotate_visual {
        renderer.draw_polygon(&rotated_corners(sprite), &sprite.color);
    } else {
        renderer.draw_rect(sprite.pos, sprite.size(), &sprite.color, true);
    }
}

/// Box corners (clockwise from top-left) rotated by the sprite's rotation
/// around its anchor point.
pub fn rotated_corners(sprite: &Sprite) -> [Vec2; 4] {
    let size = sprite.size();
    let pivot = sprite.anchor_point();
    let offset = sprite.anchor_offset();
    let rot = Vec2::from_angle(sprite.rotation.to_radians());
    [Vec2::ZERO, Vec2::new(size.x, 0.0), size, Vec2::new(0.0, size.y)]
        .map(|corner| pivot + rot.rotate(corner - offset))
}
