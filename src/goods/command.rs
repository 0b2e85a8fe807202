use async_trait::async_trait;
use color_eyre::Result;
use tokio::sync::mpsc::UnboundedSender;
use tracing::error;

use crate::api::StorefrontClient;
use crate::commands::{Command, CommandEnv};
use crate::goods::pager::FetchRequest;
use crate::goods::section::GoodsMsg;

/// Fetches one page of goods and reports back to the goods screen.
pub struct FetchGoodsPageCmd {
    pub client: StorefrontClient,
    pub request: FetchRequest,
    pub tx: UnboundedSender<GoodsMsg>,
}

#[async_trait]
impl Command for FetchGoodsPageCmd {
    fn name(&self) -> String {
        format!("Loading goods for {}", self.request.tag.theme_key)
    }

    async fn execute(self: Box<Self>, _env: CommandEnv) -> Result<()> {
        let result = self
            .client
            .list_theme_goods(
                &self.request.tag.theme_key,
                self.request.page_token.as_deref(),
            )
            .await;

        match result {
            Ok(page) => {
                let _ = self.tx.send(GoodsMsg::PageLoaded {
                    tag: self.request.tag,
                    page,
                });
            }
            Err(e) => {
                if let Some(http) = e.downcast_ref::<reqwest::Error>() {
                    error!("Error fetching theme data: {http}");
                } else {
                    error!("An unknown error occurred while fetching theme data.");
                }
                let _ = self.tx.send(GoodsMsg::FetchFailed {
                    tag: self.request.tag,
                });
            }
        }

        Ok(())
    }
}
