use anyhow::Result;
use async_trait::async_trait;

pub trait ProcessorName {
    fn name(&self) -> &'static str;
}

#[async_trait]
pub trait ProcessorTrait: ProcessorName + Send {
    async fn run_processor(self) -> Result<()>;
}
