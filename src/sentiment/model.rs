use candle_core::{DType, Device, IndexOp, Result, Tensor};
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config};
use std::path::Path;

/// BERT with a two-logit classification head over the `[CLS]` token.
pub struct BertSentimentClassifier {
    bert: BertModel,
    classifier: Linear,
}

impl BertSentimentClassifier {
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let config_path = model_dir.join("config.json");
        let weights_path = model_dir.join("model.safetensors");

        let config_content = std::fs::read_to_string(config_path)?;
        let config: Config = serde_json::from_str(&config_content)
            .map_err(|e| candle_core::Error::Msg(format!("Failed to parse config: {}", e)))?;

        let vb =
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? };

        let bert = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
            BertModel::load(vb.pp("bert"), &config)?
        } else if vb.contains_tensor("distilbert.embeddings.word_embeddings.weight") {
            BertModel::load(vb.pp("distilbert"), &config)?
        } else {
            BertModel::load(vb.clone(), &config)?
        };

        let classifier = candle_nn::linear(config.hidden_size, 2, vb.pp("classifier"))?;

        Ok(Self { bert, classifier })
    }

    /// Returns raw class logits of shape `[batch, 2]`.
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        let output = self
            .bert
            .forward(input_ids, token_type_ids, attention_mask)?;
        let cls_token = output.i((.., 0, ..))?;
        self.classifier.forward(&cls_token)
    }
}
