/*!
 * Title normalization for LaTeX sectioning commands.
 *
 * - `level`: the recognized sectioning commands
 * - `casing`: casing policies and the markup-aware casing engine
 * - `scanner`: locating titles and substituting rewritten text
 */

pub mod casing;
pub mod level;
pub mod scanner;

pub use casing::{CasingPolicy, TitleCaser, DEFAULT_STOP_WORDS};
pub use level::SectionLevel;
pub use scanner::{RewriteOutcome, TitleRewriter, TitleUnit};
