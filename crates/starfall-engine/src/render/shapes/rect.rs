use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};

use super::common::{color_array, InstancedPipeline};

/// Renderer for `DrawCmd::Rect`.
///
/// Used for opaque background fills; edges are not anti-aliased.
pub struct RectRenderer {
    pipeline: InstancedPipeline,
    instances: Vec<RectInstance>,
}

impl Default for RectRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl RectRenderer {
    pub fn new() -> Self {
        Self {
            pipeline: InstancedPipeline::new(
                "rect",
                include_str!("shaders/rect.wgsl"),
                RectInstance::layout(),
            ),
            instances: Vec::new(),
        }
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
    ) {
        self.instances.clear();

        for item in draw_list.iter_in_paint_order() {
            let DrawCmd::Rect(cmd) = &item.cmd else { continue };

            if cmd.rect.is_empty() || !cmd.rect.is_finite() {
                continue;
            }

            self.instances.push(RectInstance {
                origin: [cmd.rect.origin.x, cmd.rect.origin.y],
                size: [cmd.rect.size.x, cmd.rect.size.y],
                color: color_array(cmd.color),
            });
        }

        self.pipeline.draw(ctx, target, &self.instances);
    }
}

/// Instance data layout (32 bytes):
///
///  offset  0  origin  [f32; 2]   loc 1
///  offset  8  size    [f32; 2]   loc 2
///  offset 16  color   [f32; 4]   loc 3  (premultiplied)
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct RectInstance {
    origin: [f32; 2],
    size: [f32; 2],
    color: [f32; 4],
}

impl RectInstance {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        1 => Float32x2, // origin
        2 => Float32x2, // size
        3 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RectInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
