use configs::SchemaKind;

/// Name of the lookup key carried by every record.
pub const ID_FIELD: &str = "id";

const SALE_DEED_SCALARS: &[&str] = &[
    "metaDocumentNumber",
    "metaNotarySrNo",
    "metaDocumentType",
    "scheduleOfProperty",
    "consideration",
    "purchaserName",
    "purchaserAge",
    "purchaserOccupation",
    "purchaserAddress",
    "purchaserContact",
    "purchaserIdNumber",
    "sellerName",
    "sellerAge",
    "sellerOccupation",
    "sellerAddress",
    "sellerContact",
    "sellerIdNumber",
    "witnessName",
    "witnessAge",
    "witnessOccupation",
    "witnessAddress",
    "witnessContact",
    "witnessIdNumber",
];

// full-size photo and thumbnail for purchaser, seller, witness
const SALE_DEED_IMAGES: &[&str] = &["photoP", "photoS", "photoW", "thumbP", "thumbS", "thumbW"];

const SIMPLE_SCALARS: &[&str] = &[
    "name",
    "age",
    "occupation",
    "address",
    "contact",
    "idNumber",
    "documentNumber",
    "notarySrNo",
    "documentType",
    "executingParties",
    "propertyAddress",
    "propertyValue",
];

const SIMPLE_IMAGES: &[&str] = &["photo", "thumbImg"];

/// The set of fields a deployment stores. Payload keys outside it are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordSchema {
    pub scalar_fields: &'static [&'static str],
    pub image_fields: &'static [&'static str],
    /// Store `""` for scalar fields a create payload leaves out.
    pub fill_missing_scalars: bool,
}

impl RecordSchema {
    pub const SALE_DEED: RecordSchema = RecordSchema {
        scalar_fields: SALE_DEED_SCALARS,
        image_fields: SALE_DEED_IMAGES,
        fill_missing_scalars: false,
    };

    pub const SIMPLE: RecordSchema = RecordSchema {
        scalar_fields: SIMPLE_SCALARS,
        image_fields: SIMPLE_IMAGES,
        fill_missing_scalars: true,
    };

    pub fn for_kind(kind: SchemaKind) -> Self {
        match kind {
            SchemaKind::SaleDeed => Self::SALE_DEED,
            SchemaKind::Simple => Self::SIMPLE,
        }
    }

    pub fn is_scalar(&self, field: &str) -> bool {
        self.scalar_fields.contains(&field)
    }

    pub fn is_image(&self, field: &str) -> bool {
        self.image_fields.contains(&field)
    }
}

impl Default for RecordSchema {
    fn default() -> Self {
        Self::SALE_DEED
    }
}
