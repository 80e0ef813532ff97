//! End-to-end builder behaviour

use super::*;
use crate::foundation::logging;
use crate::scene::{Keyframe, KeyframePayload};
use approx::assert_relative_eq;

fn tri(x: f32) -> [TriVertex; 3] {
    [
        TriVertex::new([x, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0]),
        TriVertex::new([x + 1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0]),
        TriVertex::new([x + 1.0, 1.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0]),
    ]
}

fn line(x: f32) -> [LineVertex; 2] {
    [
        LineVertex::new([x, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0]),
        LineVertex::new([x, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0]),
    ]
}

fn light(x: f32) -> LightVertex {
    LightVertex::new([x, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0], 1.0)
}

#[test]
fn test_same_vertex_gets_same_index() {
    logging::init_for_tests();
    let mut obj = Obj8::new();
    {
        let mut builder = ObjBuilder::new(&mut obj);
        builder.accumulate_triangle(tri(0.0));
        builder.accumulate_triangle(tri(0.0));
    }
    assert_eq!(obj.geo_tri.len(), 3);
    assert_eq!(obj.indices.as_slice(), &[0, 1, 2, 0, 1, 2]);
}

#[test]
fn test_back_to_back_triangles_batch() {
    let mut obj = Obj8::new();
    {
        let mut builder = ObjBuilder::new(&mut obj);
        builder.accumulate_triangle(tri(0.0));
        builder.accumulate_triangle(tri(5.0));
    }
    assert_eq!(obj.lods.len(), 1);
    assert_eq!(obj.lods[0].commands, vec![Command::Triangles(DrawRange::new(0, 6))]);
}

#[test]
fn test_attribute_change_splits_batch() {
    let mut obj = Obj8::new();
    {
        let mut builder = ObjBuilder::new(&mut obj);
        builder.accumulate_triangle(tri(0.0));
        builder.set_two_sided(true);
        builder.accumulate_triangle(tri(5.0));
    }
    assert_eq!(
        obj.lods[0].commands,
        vec![
            Command::Triangles(DrawRange::new(0, 3)),
            Command::Attribute(AttributeCommand::NoCull),
            Command::Triangles(DrawRange::new(3, 3)),
        ]
    );
}

#[test]
fn test_redundant_attribute_does_not_split_batch() {
    let mut obj = Obj8::new();
    {
        let mut builder = ObjBuilder::new(&mut obj);
        builder.accumulate_triangle(tri(0.0));
        builder.set_flat_shading(false);
        builder.set_diffuse([1.0, 1.0, 1.0]);
        builder.accumulate_triangle(tri(5.0));
    }
    assert_eq!(obj.lods[0].commands, vec![Command::Triangles(DrawRange::new(0, 6))]);
}

#[test]
fn test_attribute_set_twice_emits_net_value() {
    let mut obj = Obj8::new();
    {
        let mut builder = ObjBuilder::new(&mut obj);
        builder.set_shininess(0.2);
        builder.set_shininess(0.7);
        builder.accumulate_triangle(tri(0.0));
    }
    assert_eq!(
        obj.lods[0].commands,
        vec![
            Command::Attribute(AttributeCommand::ShinyRatio(0.7)),
            Command::Triangles(DrawRange::new(0, 3)),
        ]
    );
}

#[test]
fn test_attributes_before_first_geometry_survive_default_bucket() {
    let mut obj = Obj8::new();
    {
        let mut builder = ObjBuilder::new(&mut obj);
        builder.set_flat_shading(true);
        builder.accumulate_line(line(0.0));
    }
    assert_eq!(
        obj.lods[0].commands,
        vec![
            Command::Attribute(AttributeCommand::ShadeFlat),
            Command::Lines(DrawRange::new(0, 2)),
        ]
    );
}

#[test]
fn test_sync_is_minimal() {
    let mut obj = Obj8::new();
    let mut builder = ObjBuilder::new(&mut obj);
    builder.set_blend();
    assert_eq!(builder.sync(), 0);
    builder.set_polygon_offset(2.0);
    assert_eq!(builder.sync(), 1);
    assert_eq!(builder.sync(), 0);
}

#[test]
fn test_return_to_default_material_emits_single_reset() {
    let mut obj = Obj8::new();
    {
        let mut builder = ObjBuilder::new(&mut obj);
        builder.set_emission([1.0, 0.5, 0.0]);
        builder.set_diffuse([0.3, 0.3, 0.3]);
        builder.set_shininess(0.9);
        builder.accumulate_triangle(tri(0.0));
        builder.set_emission([0.0, 0.0, 0.0]);
        builder.set_diffuse([1.0, 1.0, 1.0]);
        builder.set_shininess(0.0);
        builder.accumulate_triangle(tri(5.0));
    }
    let commands = &obj.lods[0].commands;
    assert_eq!(commands.len(), 6);
    assert_eq!(commands[4], Command::Attribute(AttributeCommand::Reset));
    assert_eq!(commands[5], Command::Triangles(DrawRange::new(3, 3)));
}

#[test]
fn test_lines_and_lights_batch() {
    let mut obj = Obj8::new();
    {
        let mut builder = ObjBuilder::new(&mut obj);
        builder.accumulate_line(line(0.0));
        builder.accumulate_line(line(1.0));
        builder.accumulate_light(light(0.0));
        builder.accumulate_light(light(1.0));
        builder.accumulate_light(light(0.0));
    }
    assert_eq!(
        obj.lods[0].commands,
        vec![
            Command::Lines(DrawRange::new(0, 4)),
            Command::Lights(DrawRange::new(0, 2)),
            Command::Lights(DrawRange::new(0, 1)),
        ]
    );
    assert_eq!(obj.geo_lights.len(), 2);
}

#[test]
fn test_single_shot_commands_never_merge() {
    let mut obj = Obj8::new();
    {
        let mut builder = ObjBuilder::new(&mut obj);
        builder.named_light([0.0, 1.0, 0.0], "airplane_beacon");
        builder.named_light([0.0, 1.0, 0.0], "airplane_beacon");
        builder.custom_light([1.0, 2.0, 3.0], [1.0, 1.0, 1.0, 1.0, 4.0, 0.0, 0.0, 1.0, 1.0], "sim/lights/custom");
        builder.smoke(SmokeKind::White, [0.0, 5.0, 0.0], 2.0);
        builder.smoke(SmokeKind::White, [0.0, 5.0, 0.0], 2.0);
    }
    let commands = &obj.lods[0].commands;
    assert_eq!(commands.len(), 5);
    assert_eq!(
        commands[2],
        Command::CustomLight {
            position: [1.0, 2.0, 3.0],
            params: [1.0, 1.0, 1.0, 1.0, 4.0, 0.0, 0.0, 1.0, 1.0],
            dataref: "sim/lights/custom".to_string(),
        }
    );
}

#[test]
fn test_texture_mapping_applies_before_dedup() {
    let mut obj = Obj8::new();
    {
        let mut builder = ObjBuilder::new(&mut obj);
        builder.accumulate_triangle(tri(0.0));
        builder.set_texture_mapping(TextureMapping::new(2.0, 2.0, 0.5, 0.0));
        builder.accumulate_triangle(tri(0.0));
    }
    // Same geometry, different mapped UVs: nothing dedups across the change.
    assert_eq!(obj.geo_tri.len(), 6);
    let mapped = obj.geo_tri.get(4).map(|v| v.tex_coord).unwrap_or_default();
    assert_relative_eq!(mapped[0], 2.5);
    assert_relative_eq!(mapped[1], 0.0);
    // Earlier vertices keep their unmapped coordinates.
    assert_eq!(obj.geo_tri.get(1).map(|v| v.tex_coord), Some([1.0, 0.0]));
}

#[test]
fn test_texture_mapping_skips_lines() {
    let mut obj = Obj8::new();
    {
        let mut builder = ObjBuilder::new(&mut obj);
        builder.set_texture_mapping(TextureMapping::new(3.0, 3.0, 1.0, 1.0));
        builder.accumulate_line(line(0.0));
    }
    assert_eq!(obj.geo_lines.get(0).map(|v| v.tex_coord), Some([0.0, 0.0]));
}

#[test]
fn test_translate_keyframes_reversed() {
    let mut obj = Obj8::new();
    {
        let mut builder = ObjBuilder::new(&mut obj);
        builder.begin_translate("sim/door");
        builder.add_translate_key(10.0, [0.0, 3.0, 0.0]);
        builder.add_translate_key(0.0, [0.0, 0.0, 0.0]);
        builder.end_translate();
    }
    assert_eq!(
        obj.animations[0].keyframes,
        vec![
            Keyframe::new(0.0, KeyframePayload::Translation([0.0, 0.0, 0.0])),
            Keyframe::new(10.0, KeyframePayload::Translation([0.0, 3.0, 0.0])),
        ]
    );
}

#[test]
fn test_translate_keyframes_in_order_untouched() {
    let mut obj = Obj8::new();
    {
        let mut builder = ObjBuilder::new(&mut obj);
        builder.translate([0.0, 0.0, 0.0], [0.0, 3.0, 0.0], 0.0, 10.0, "sim/door");
    }
    let keys: Vec<f32> = obj.animations[0].keyframes.iter().map(|k| k.key).collect();
    assert_eq!(keys, vec![0.0, 10.0]);
    assert_eq!(
        obj.animations[0].keyframes[1].payload,
        KeyframePayload::Translation([0.0, 3.0, 0.0])
    );
}

#[test]
fn test_animation_bracket() {
    let mut obj = Obj8::new();
    {
        let mut builder = ObjBuilder::new(&mut obj);
        builder.begin_animation();
        builder.rotate([0.0, 1.0, 0.0], 90.0, 0.0, 1.0, 0.0, "sim/gear");
        builder.hide(0.0, 0.5, "sim/gear");
        builder.accumulate_triangle(tri(0.0));
        builder.end_animation();
    }
    assert_eq!(
        obj.lods[0].commands,
        vec![
            Command::Animation(AnimationCommand::Begin),
            Command::Animation(AnimationCommand::Rotate(0)),
            Command::Animation(AnimationCommand::Hide(1)),
            Command::Triangles(DrawRange::new(0, 3)),
            Command::Animation(AnimationCommand::End),
        ]
    );
    assert_eq!(
        obj.animations[0].keyframes,
        vec![
            Keyframe::new(0.0, KeyframePayload::Rotation(0.0)),
            Keyframe::new(1.0, KeyframePayload::Rotation(90.0)),
        ]
    );
}

#[test]
fn test_geometry_without_lod_creates_default_bucket() {
    let mut obj = Obj8::new();
    {
        let mut builder = ObjBuilder::new(&mut obj);
        builder.accumulate_light(light(0.0));
    }
    assert_eq!(obj.lods.len(), 1);
    assert_eq!((obj.lods[0].near, obj.lods[0].far), (0.0, 0.0));
}

#[test]
fn test_begin_lod_resets_state_without_spurious_commands() {
    let mut obj = Obj8::new();
    {
        let mut builder = ObjBuilder::new(&mut obj);
        builder.begin_lod(0.0, 100.0);
        builder.set_two_sided(true);
        builder.accumulate_triangle(tri(0.0));
        builder.begin_lod(100.0, 1000.0);
        builder.accumulate_triangle(tri(0.0));
    }
    assert_eq!(obj.lods.len(), 2);
    assert_eq!(obj.lods[1].commands, vec![Command::Triangles(DrawRange::new(3, 3))]);
}

#[test]
fn test_end_lod_flushes_pending_attributes() {
    let mut obj = Obj8::new();
    {
        let mut builder = ObjBuilder::new(&mut obj);
        builder.begin_lod(0.0, 100.0);
        builder.accumulate_triangle(tri(0.0));
        builder.set_flat_shading(true);
        builder.end_lod();
        assert_eq!(builder.obj().lods[0].len(), 2);
    }
    assert_eq!(obj.lods[0].commands[1], Command::Attribute(AttributeCommand::ShadeFlat));
}

#[test]
fn test_drop_ends_active_lod() {
    let mut obj = Obj8::new();
    {
        let mut builder = ObjBuilder::new(&mut obj);
        builder.begin_lod(0.0, 100.0);
        builder.set_hard(Some("object"));
    }
    assert_eq!(obj.lods[0].commands, vec![Command::Attribute(AttributeCommand::Hard(None))]);
}

#[test]
fn test_layer_group_goes_to_first_bucket() {
    let mut obj = Obj8::new();
    {
        let mut builder = ObjBuilder::new(&mut obj);
        builder.begin_lod(0.0, 100.0);
        builder.accumulate_triangle(tri(0.0));
        builder.set_no_blend_default();
        builder.accumulate_triangle(tri(5.0));
        builder.begin_lod(100.0, 1000.0);
        builder.accumulate_triangle(tri(0.0));
        builder.set_layer_group("objects", 1);
        builder.finish();
    }
    assert_eq!(
        obj.lods[0].commands,
        vec![
            Command::Attribute(AttributeCommand::LayerGroup {
                name: "objects".to_string(),
                offset: 1,
            }),
            Command::Triangles(DrawRange::new(0, 3)),
            Command::Attribute(AttributeCommand::NoBlend(0.5)),
            Command::Triangles(DrawRange::new(3, 3)),
        ]
    );
    assert_eq!(obj.lods[1].commands, vec![Command::Triangles(DrawRange::new(6, 3))]);
}

#[test]
fn test_layer_group_from_config() {
    let config = BuilderConfig::new().with_layer_group("markings", 0);
    let mut obj = Obj8::new();
    {
        let mut builder = ObjBuilder::with_config(&mut obj, &config);
        builder.accumulate_triangle(tri(0.0));
        builder.finish();
    }
    assert!(matches!(
        &obj.lods[0].commands[0],
        Command::Attribute(AttributeCommand::LayerGroup { name, .. }) if name == "markings"
    ));
}

#[test]
fn test_finish_without_buckets_is_noop() {
    let mut obj = Obj8::new();
    {
        let mut builder = ObjBuilder::new(&mut obj);
        builder.set_layer_group("objects", 0);
        builder.finish();
    }
    assert!(obj.lods.is_empty());
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "finish called twice")]
fn test_double_finish_panics_in_debug() {
    let mut obj = Obj8::new();
    let mut builder = ObjBuilder::new(&mut obj);
    builder.finish();
    builder.finish();
}

#[test]
fn test_pool_and_index_sizes_match_input() {
    let mut obj = Obj8::new();
    let calls = [0.0, 1.0, 0.0, 2.0, 1.0, 0.0];
    {
        let mut builder = ObjBuilder::new(&mut obj);
        for &x in &calls {
            builder.accumulate_triangle(tri(x * 10.0));
        }
    }
    assert_eq!(obj.geo_tri.len(), 9);
    assert_eq!(obj.indices.len(), calls.len() * 3);
    assert_eq!(obj.lods[0].commands, vec![Command::Triangles(DrawRange::new(0, 18))]);
}

#[test]
fn test_end_lod_returns_state_to_defaults() {
    let mut obj = Obj8::new();
    {
        let mut builder = ObjBuilder::new(&mut obj);
        builder.begin_lod(0.0, 100.0);
        builder.set_two_sided(true);
        builder.accumulate_triangle(tri(0.0));
        builder.end_lod();
        assert_eq!(builder.state().authored(), &AttributeState::default());
        builder.accumulate_triangle(tri(0.0));
    }
    assert_eq!(obj.lods.len(), 2);
    assert_eq!(obj.lods[1].commands, vec![Command::Triangles(DrawRange::new(3, 3))]);
}

#[test]
fn test_single_shot_commands_leave_attributes_pending() {
    let mut obj = Obj8::new();
    {
        let mut builder = ObjBuilder::new(&mut obj);
        builder.set_flat_shading(true);
        builder.named_light([0.0, 1.0, 0.0], "airplane_beacon");
        builder.smoke(SmokeKind::Black, [0.0, 2.0, 0.0], 1.0);
        builder.show(0.0, 1.0, "sim/gear");
        builder.begin_translate("sim/door");
        builder.end_translate();
        builder.begin_animation();
        assert!(builder.state().is_dirty());
        builder.accumulate_triangle(tri(0.0));
    }
    let commands = &obj.lods[0].commands;
    assert_eq!(commands.len(), 7);
    assert!(commands[..5]
        .iter()
        .all(|command| !matches!(command, Command::Attribute(_))));
    assert_eq!(commands[5], Command::Attribute(AttributeCommand::ShadeFlat));
    assert_eq!(commands[6], Command::Triangles(DrawRange::new(0, 3)));
}

#[test]
fn test_empty_layer_group_is_unset() {
    let mut obj = Obj8::new();
    {
        let mut builder = ObjBuilder::new(&mut obj);
        builder.set_layer_group("objects", 2);
        builder.set_layer_group("", 0);
        builder.named_light([0.0, 0.0, 0.0], "airplane_beacon");
        builder.finish();
    }
    assert_eq!(obj.lods[0].len(), 1);
    assert!(matches!(obj.lods[0].commands[0], Command::NamedLight { .. }));
}

#[test]
fn test_empty_layer_group_from_config_is_ignored() {
    let config = BuilderConfig::new().with_layer_group("", 3);
    let mut obj = Obj8::new();
    {
        let mut builder = ObjBuilder::with_config(&mut obj, &config);
        builder.accumulate_triangle(tri(0.0));
        builder.finish();
    }
    assert_eq!(obj.lods[0].commands, vec![Command::Triangles(DrawRange::new(0, 3))]);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "animation still open")]
fn test_finish_with_open_animation_panics_in_debug() {
    let mut obj = Obj8::new();
    let mut builder = ObjBuilder::new(&mut obj);
    builder.begin_rotate([0.0, 1.0, 0.0], "sim/prop");
    builder.add_rotate_key(1.0, 360.0);
    builder.finish();
}
