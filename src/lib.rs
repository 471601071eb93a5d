pub mod error;
pub mod resource;
pub mod tgi;

pub use error::{CatalogError, Result};
pub use tgi::{ResourceKey, TgiLayout, TgiReference};
pub use resource::{CatalogResource, Resource};
pub use resource::common::{CatalogCommon, PackFlags, PackInfo, FNV32_OFFSET_BASIS};
pub use resource::lists::{
    read_counted, write_counted, CatalogTagList, ColorList, CountWidth, SellingPoint, SellingPointList, TagFormat, TgiList,
};
pub use resource::value::{ByteBool, TaggedEntry, TaggedValue, TaggedValueList};
pub use resource::shapes::{AbstractCatalogResource, AuralMaterials, AuralProperties, ObjectCatalogResource, SimpleCatalogResource};
pub use resource::structures::{CcolResource, CflrResource, CfndResource, CpmpResource, CstlResource, CstrResource, CtptResource, CwalResource};
pub use resource::trims::{CfenResource, CfltResource, CfrzResource, CralResource, CrptResource, CrtrResource, CspnResource};
pub use resource::objects::{CblkResource, CceiResource, CftrResource, ChwlResource, CobjResource, CrmtResource, CwnsResource};
pub use resource::object_definition::{ObjectDefinitionResource, PropertyId, PropertyValue, ValueKind};
