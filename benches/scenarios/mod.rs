mod renderer;

pub use renderer::bench_renderer;
