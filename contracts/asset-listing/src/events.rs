use super::*;

/// An untagged event of a listing being created.
#[derive(Debug, Serialize, SchemaType)]
pub struct CreatedEvent {
    /// Listed asset.
    pub asset: Asset,
    /// Initial unit price.
    pub unit_price: Amount,
}

/// An untagged event of the unit price being updated.
#[derive(Debug, Serialize, SchemaType)]
pub struct UpdatePriceEvent {
    pub previous: Amount,
    pub current: Amount,
}

/// An untagged event of an address being registered for the listed asset.
#[derive(Debug, Serialize, SchemaType)]
pub struct OptInEvent {
    /// Newly registered address.
    pub address: Address,
}

/// Tagged Custom event to be serialized for the event log.
#[derive(Debug)]
pub enum CustomEvent {
    /// Listing created
    Created(CreatedEvent),
    /// Unit price updated
    UpdatePrice(UpdatePriceEvent),
    /// Address registered for the asset
    OptIn(OptInEvent),
}

impl Serial for CustomEvent {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        match self {
            CustomEvent::Created(event) => {
                out.write_u8(CREATED_TAG)?;
                event.serial(out)
            }
            CustomEvent::UpdatePrice(event) => {
                out.write_u8(UPDATE_PRICE_TAG)?;
                event.serial(out)
            }
            CustomEvent::OptIn(event) => {
                out.write_u8(OPT_IN_TAG)?;
                event.serial(out)
            }
        }
    }
}

impl Deserial for CustomEvent {
    fn deserial<R: Read>(source: &mut R) -> ParseResult<Self> {
        let tag = source.read_u8()?;
        match tag {
            CREATED_TAG => CreatedEvent::deserial(source).map(CustomEvent::Created),
            UPDATE_PRICE_TAG => UpdatePriceEvent::deserial(source).map(CustomEvent::UpdatePrice),
            OPT_IN_TAG => OptInEvent::deserial(source).map(CustomEvent::OptIn),
            _ => Err(ParseError::default()),
        }
    }
}
