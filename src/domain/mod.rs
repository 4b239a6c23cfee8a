pub mod control;
pub mod joint;
pub mod rig;
pub mod segment;

pub use control::{ControlImpulse, ControlKey, ControlMapper, ControlState, InputAction};
pub use joint::{AngleLimit, Joint, JointSpec};
pub use rig::{Rig, RigVariant};
pub use segment::{CollisionCategory, Pose, Segment, SegmentKind, Velocity};
