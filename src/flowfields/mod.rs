//! Flowfields are a means of handling pathfinding for a crowd of actors.
//!
//! [Fixing Pathfinding Once and For All](https://web.archive.org/web/20150905073624/http://www.ai-blog.net/archives/000152.html)
//!
//! [jdxdev](https://www.jdxdev.com/blog/2020/05/03/flowfields/)
//!
//! [leifnode](https://leifnode.com/2013/12/flow-field-pathfinding/)
//!
//! Rather than searching for a path per actor a single goal is chosen and every
//! node of a grid is told which way to move to reach it. Any number of actors
//! can then sample the grid at their position to find their heading.
//!
//! Definitions:
//!
//! * Grid - a `columns x rows` arrangement of nodes, each node connected to its orthogonal and optionally diagonal neighbours. Nodes are indexed from the top-left corner
//!
//! ```text
//!  _____________________________
//! |__|__|__|__|__|__|__|__|__|__|
//! |__|__|__|__|__|__|__|__|__|__|
//! |__|__|__|__|__|__|__|__|__|__|
//! |__|__|__|__|__|__|__|__|__|__|
//! |__|__|__|__|__|__|__|__|__|__|
//! ```
//!
//! * Terrain - classification of a node (open ground, mud, water) which decides how costly it is to enter
//! * Cost field - 8-bit field where a value of 255 represents impassable terrain and range 1 - 254
//! represents the cost of traversing that grid location, 1 being the default and easiest
//! * Integration field - uses the cost field as input and stores the calculated cost-to-goal (cost to path to the eventual location you want to end up at)
//! * Vector field - 8-bit field used by actors to flow from one area of space to another. The first 4 bits
//! of the field represent directions of movement and the second 4 bits are flags to indicate whether a
//! field cell is pathable or the goal
//!

pub mod fields;
pub mod flow_field_path;
pub mod grid;
pub mod utilities;
