/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
#![allow(unused)]

use std::fmt;
use chrono::{DateTime, Utc};

/// the six SBS message kinds, identified by the tag in field 0
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash)]
pub enum MessageType {
    NewAircraft,
    NewId,
    SelectionChange,
    StatusChange,
    Click,
    Transmission,
}

impl MessageType {
    pub fn from_tag (tag: &str)->Option<MessageType> {
        match tag {
            "AIR" => Some(MessageType::NewAircraft),
            "ID"  => Some(MessageType::NewId),
            "SEL" => Some(MessageType::SelectionChange),
            "STA" => Some(MessageType::StatusChange),
            "CLK" => Some(MessageType::Click),
            "MSG" => Some(MessageType::Transmission),
            _ => None
        }
    }

    pub fn tag (&self)->&'static str {
        match self {
            MessageType::NewAircraft => "AIR",
            MessageType::NewId => "ID",
            MessageType::SelectionChange => "SEL",
            MessageType::StatusChange => "STA",
            MessageType::Click => "CLK",
            MessageType::Transmission => "MSG",
        }
    }

    /// binary type tag
    pub fn code (&self)->u8 {
        match self {
            MessageType::NewAircraft => 1,
            MessageType::NewId => 2,
            MessageType::SelectionChange => 3,
            MessageType::StatusChange => 4,
            MessageType::Click => 5,
            MessageType::Transmission => 6,
        }
    }

    pub fn from_code (code: u8)->Option<MessageType> {
        match code {
            1 => Some(MessageType::NewAircraft),
            2 => Some(MessageType::NewId),
            3 => Some(MessageType::SelectionChange),
            4 => Some(MessageType::StatusChange),
            5 => Some(MessageType::Click),
            6 => Some(MessageType::Transmission),
            _ => None
        }
    }
}

/// MSG subtypes (field 1). Note these are SBS transmission types, not ADS-B type codes
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash)]
pub enum TransmissionKind {
    IdentityAndCategory,  // 1: ES identification and category
    SurfacePosition,      // 2: ES surface position
    AirbornePosition,     // 3: ES airborne position
    AirborneVelocity,     // 4: ES airborne velocity
    SurveillanceAltitude, // 5: surveillance alt message
    SurveillanceIdentity, // 6: surveillance id message
    AirToAir,             // 7: air-to-air message
    AllCallReply,         // 8: all call reply
}

impl TransmissionKind {
    pub fn from_id (id: u8)->Option<TransmissionKind> {
        match id {
            1 => Some(TransmissionKind::IdentityAndCategory),
            2 => Some(TransmissionKind::SurfacePosition),
            3 => Some(TransmissionKind::AirbornePosition),
            4 => Some(TransmissionKind::AirborneVelocity),
            5 => Some(TransmissionKind::SurveillanceAltitude),
            6 => Some(TransmissionKind::SurveillanceIdentity),
            7 => Some(TransmissionKind::AirToAir),
            8 => Some(TransmissionKind::AllCallReply),
            _ => None
        }
    }

    pub fn id (&self)->u8 {
        match self {
            TransmissionKind::IdentityAndCategory => 1,
            TransmissionKind::SurfacePosition => 2,
            TransmissionKind::AirbornePosition => 3,
            TransmissionKind::AirborneVelocity => 4,
            TransmissionKind::SurveillanceAltitude => 5,
            TransmissionKind::SurveillanceIdentity => 6,
            TransmissionKind::AirToAir => 7,
            TransmissionKind::AllCallReply => 8,
        }
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash)]
pub enum AircraftStatus {
    Ok,
    PositionLost,
    SignalLost,
    Remove,
    Delete,
}

impl AircraftStatus {
    pub fn from_code (code: &str)->Option<AircraftStatus> {
        match code {
            "OK" => Some(AircraftStatus::Ok),
            "PL" => Some(AircraftStatus::PositionLost),
            "SL" => Some(AircraftStatus::SignalLost),
            "RM" => Some(AircraftStatus::Remove),
            "AD" => Some(AircraftStatus::Delete),
            _ => None
        }
    }

    pub fn code (&self)->&'static str {
        match self {
            AircraftStatus::Ok => "OK",
            AircraftStatus::PositionLost => "PL",
            AircraftStatus::SignalLost => "SL",
            AircraftStatus::Remove => "RM",
            AircraftStatus::Delete => "AD",
        }
    }

    pub fn to_byte (&self)->u8 {
        match self {
            AircraftStatus::Ok => 0,
            AircraftStatus::PositionLost => 1,
            AircraftStatus::SignalLost => 2,
            AircraftStatus::Remove => 3,
            AircraftStatus::Delete => 4,
        }
    }

    pub fn from_byte (b: u8)->Option<AircraftStatus> {
        match b {
            0 => Some(AircraftStatus::Ok),
            1 => Some(AircraftStatus::PositionLost),
            2 => Some(AircraftStatus::SignalLost),
            3 => Some(AircraftStatus::Remove),
            4 => Some(AircraftStatus::Delete),
            _ => None
        }
    }

    /// does this status end the current track of an aircraft
    pub fn is_terminal (&self)->bool {
        !matches!( self, AircraftStatus::Ok)
    }
}

/// the fields 1-9 that are common to all SBS messages
#[derive(Debug,Clone,PartialEq,Default)]
pub struct MsgHeader {
    pub transmission_type_id: u8, // 0 if not set
    pub session_id: i32,
    pub aircraft_id: i32,
    pub hex_id: String,           // ICAO 24 bit address in upper case hex
    pub flight_id: i32,
    pub generated_at: Option<DateTime<Utc>>,
    pub logged_at: Option<DateTime<Utc>>,
}

impl MsgHeader {
    pub fn transmission_kind (&self)->Option<TransmissionKind> {
        TransmissionKind::from_id( self.transmission_type_id)
    }
}

/// the MSG specific fields 10-21. All of them are optional since which ones are set depends on the
/// transmission kind and the receiver
#[derive(Debug,Clone,PartialEq,Default)]
pub struct TransmissionData {
    pub callsign: Option<String>,
    pub altitude: Option<f64>,      // mode-C altitude [ft]
    pub ground_speed: Option<f64>,  // [kn]
    pub ground_track: Option<f64>,  // [deg] computed from vx,vy, not heading
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub vertical_rate: Option<f64>, // [ft/min]
    pub squawk: Option<i32>,
    pub alert: Option<bool>,        // squawk has changed
    pub emergency: Option<bool>,
    pub spi: Option<bool>,          // transponder ident activated
    pub is_on_ground: Option<bool>,
}

impl TransmissionData {
    pub fn position (&self)->Option<(f64,f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat,lon)),
            _ => None
        }
    }
}

/// a decoded SBS message
#[derive(Debug,Clone,PartialEq)]
pub enum SbsMessage {
    NewAircraft { header: MsgHeader },
    NewId { header: MsgHeader, callsign: String },
    SelectionChange { header: MsgHeader, callsign: String },
    StatusChange { header: MsgHeader, status: AircraftStatus },
    Click { header: MsgHeader },
    Transmission { header: MsgHeader, data: TransmissionData },
}

impl SbsMessage {
    pub fn header (&self)->&MsgHeader {
        match self {
            SbsMessage::NewAircraft{header} => header,
            SbsMessage::NewId{header,..} => header,
            SbsMessage::SelectionChange{header,..} => header,
            SbsMessage::StatusChange{header,..} => header,
            SbsMessage::Click{header} => header,
            SbsMessage::Transmission{header,..} => header,
        }
    }

    pub fn msg_type (&self)->MessageType {
        match self {
            SbsMessage::NewAircraft{..} => MessageType::NewAircraft,
            SbsMessage::NewId{..} => MessageType::NewId,
            SbsMessage::SelectionChange{..} => MessageType::SelectionChange,
            SbsMessage::StatusChange{..} => MessageType::StatusChange,
            SbsMessage::Click{..} => MessageType::Click,
            SbsMessage::Transmission{..} => MessageType::Transmission,
        }
    }

    #[inline] pub fn hex_id (&self)->&str { self.header().hex_id.as_str() }

    #[inline] pub fn generated_at (&self)->Option<DateTime<Utc>> { self.header().generated_at }

    #[inline] pub fn transmission_kind (&self)->Option<TransmissionKind> { self.header().transmission_kind() }

    /// (time,lat,lon,altitude) if this is a timed airborne position report
    pub fn airborne_position (&self)->Option<(DateTime<Utc>,f64,f64,Option<f64>)> {
        if let SbsMessage::Transmission{header,data} = self
            && header.transmission_kind() == Some(TransmissionKind::AirbornePosition)
            && let Some(date) = header.generated_at
            && let Some((lat,lon)) = data.position()
        {
            Some( (date, lat, lon, data.altitude) )
        } else {
            None
        }
    }
}

impl fmt::Display for SbsMessage {
    fn fmt (&self, f: &mut fmt::Formatter<'_>)->fmt::Result {
        let header = self.header();
        write!( f, "{}", self.msg_type().tag())?;
        if header.transmission_type_id > 0 { write!( f, ",{}", header.transmission_type_id)?; }
        write!( f, "( hex: {}", header.hex_id)?;
        if let Some(date) = header.generated_at { write!( f, ", time: {}", date.format("%Y-%m-%dT%H:%M:%S%.3fZ"))?; }

        match self {
            SbsMessage::NewId{callsign,..} | SbsMessage::SelectionChange{callsign,..} => write!( f, ", cs: \"{callsign}\"")?,
            SbsMessage::StatusChange{status,..} => write!( f, ", status: {status:?}")?,
            SbsMessage::Transmission{data,..} => {
                if let Some(cs) = &data.callsign { write!( f, ", cs: \"{cs}\"")?; }
                if let Some(alt) = data.altitude { write!( f, ", alt: {alt:.0}")?; }
                if let Some((lat,lon)) = data.position() { write!( f, ", pos: ({lat:.5},{lon:.5})")?; }
                if let Some(gs) = data.ground_speed { write!( f, ", spd: {gs:.1}")?; }
                if let Some(trk) = data.ground_track { write!( f, ", trk: {trk:.0}")?; }
                if let Some(vr) = data.vertical_rate { write!( f, ", vr: {vr:.0}")?; }
                if let Some(sq) = data.squawk { write!( f, ", squawk: {sq:04}")?; }
                if data.is_on_ground == Some(true) { write!( f, ", gnd")?; }
            }
            _ => {}
        }
        write!( f, ")")
    }
}
