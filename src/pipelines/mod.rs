pub use self::kernel_pipeline::{KernelPipeline, PipelineParameters};

mod kernel_pipeline;
