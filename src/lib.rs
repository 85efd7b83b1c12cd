pub mod classifier;
pub mod preprocess;
pub mod server;
pub mod settings;

/// Fixed doodled tunables -- runtime settings (bind address, model path) live
/// in [`settings`] instead
pub mod config {
    /// The doodle categories, index-aligned with the model's output layer
    pub const CATEGORIES: [&str; 8] = [
        "cat", "dog", "house", "tree", "car", "apple", "banana", "clock",
    ];

    /// Keep the `TOP_N` largest probabilities in a ranked response
    pub const TOP_N: usize = 5;

    /// Edge length, in pixels, of the square bitmap the model expects
    pub const IMAGE_SIZE: u32 = 28;

    /// Default path to the ONNX model artifact
    pub const DEFAULT_MODEL_PATH: &str = "doodle_model.onnx";
}
