/*
 * Responsibility
 * - リソースごとの「意味付き公開ID型」を宣言する
 *
 * 置くもの
 *  - SampleTag などのタグ型と type alias
 * 置かないもの
 *  - decode ロジック / extractor 実装 (core 側)
 */
use super::core::PublicId;

// samples
pub enum SampleTag {}
pub type PublicSampleId = PublicId<SampleTag>;
