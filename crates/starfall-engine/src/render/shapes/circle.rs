use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};

use super::common::{color_array, InstancedPipeline};

/// Renderer for `DrawCmd::Circle`.
///
/// Circles are anti-aliased over one logical pixel at the edge. Sub-pixel
/// radii still produce a faint dot rather than vanishing, which keeps
/// distant stars visible.
pub struct CircleRenderer {
    pipeline: InstancedPipeline,
    instances: Vec<CircleInstance>,
}

impl Default for CircleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl CircleRenderer {
    pub fn new() -> Self {
        Self {
            pipeline: InstancedPipeline::new(
                "circle",
                include_str!("shaders/circle.wgsl"),
                CircleInstance::layout(),
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
            let DrawCmd::Circle(cmd) = &item.cmd else { continue };

            if cmd.radius <= 0.0 || !cmd.radius.is_finite() || !cmd.center.is_finite() {
                continue;
            }

            self.instances.push(CircleInstance {
                center: [cmd.center.x, cmd.center.y],
                radius: [cmd.radius, 0.0],
                color: color_array(cmd.color),
            });
        }

        self.pipeline.draw(ctx, target, &self.instances);
    }
}

/// Instance data layout (32 bytes):
///
///  offset  0  center  [f32; 2]   loc 1
///  offset  8  radius  [f32; 2]   loc 2  (.x = radius, .y unused)
///  offset 16  color   [f32; 4]   loc 3  (premultiplied)
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CircleInstance {
    center: [f32; 2],
    radius: [f32; 2],
    color: [f32; 4],
}

impl CircleInstance {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        1 => Float32x2, // center
        2 => Float32x2, // radius
        3 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CircleInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
