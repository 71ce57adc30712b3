use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct PlaneVertex {
    position: [f32; 2],
    uv: [f32; 2],
}

// Unit quad centred on the origin; uv (0, 0) is the image's top-left.
const VERTICES: [PlaneVertex; 4] = [
    PlaneVertex {
        position: [-0.5, 0.5],
        uv: [0.0, 0.0],
    },
    PlaneVertex {
        position: [0.5, 0.5],
        uv: [1.0, 0.0],
    },
    PlaneVertex {
        position: [0.5, -0.5],
        uv: [1.0, 1.0],
    },
    PlaneVertex {
        position: [-0.5, -0.5],
        uv: [0.0, 1.0],
    },
];

const INDICES: [u16; 6] = [0, 3, 2, 0, 2, 1];

const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];

/// Plane geometry shared by every media mesh; per-mesh size comes from the
/// model matrix.
pub(crate) struct PlaneGeometry {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    pub(crate) index_count: u32,
}

impl PlaneGeometry {
    pub(crate) fn new(device: &wgpu::Device) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("plane_vb"),
            contents: bytemuck::cast_slice(&VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("plane_ib"),
            contents: bytemuck::cast_slice(&INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: INDICES.len() as u32,
        }
    }

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PlaneVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}
